use chrono::NaiveDate;
use popboard_core::{filter_active, is_active, sort_by_recency, Popup};
use serde_json::json;

fn popup(v: serde_json::Value) -> Popup {
    serde_json::from_value(v).unwrap()
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn date_bounds_are_inclusive() {
    let p = popup(json!({ "id": 1, "startDate": "2024-05-01", "endDate": "2024-05-31" }));
    assert!(!is_active(&p, day("2024-04-30")));
    assert!(is_active(&p, day("2024-05-01")));
    assert!(is_active(&p, day("2024-05-31")));
    assert!(!is_active(&p, day("2024-06-01")));
}

#[test]
fn future_start_and_past_end_are_excluded() {
    let v = vec![
        popup(json!({ "id": 1, "startDate": "2099-01-01" })),
        popup(json!({ "id": 2, "endDate": "2000-01-01" })),
        popup(json!({ "id": 3 })),
        popup(json!({ "id": 4, "startDate": "", "endDate": null })),
    ];
    let active = filter_active(&v, day("2024-05-10"));
    let ids: Vec<_> = active.iter().map(|p| p.numeric_id().unwrap()).collect();
    assert_eq!(ids, vec![3, 4]);
}

#[test]
fn far_future_start_is_never_active_before_it() {
    let v = vec![popup(json!({ "id": 1, "startDate": "2099-01-01" }))];
    assert!(filter_active(&v, day("2098-12-31")).is_empty());
}

#[test]
fn recency_puts_missing_saved_at_last() {
    let mut v = vec![
        popup(json!({ "id": 1 })),
        popup(json!({ "id": 2, "savedAt": "2024-01-01T00:00:00.000Z" })),
        popup(json!({ "id": 3, "savedAt": "2024-03-01T00:00:00.000Z" })),
        popup(json!({ "id": 4, "savedAt": "not a date" })),
        popup(json!({ "id": 5, "savedAt": "2024-02-01" })),
    ];
    sort_by_recency(&mut v);
    let ids: Vec<_> = v.iter().map(|p| p.numeric_id().unwrap()).collect();
    assert_eq!(ids, vec![3, 5, 2, 1, 4]);
}

#[test]
fn numeric_saved_at_sorts_with_string_ones() {
    let mut v = vec![
        popup(json!({ "id": 1, "savedAt": "2023-01-01T00:00:00.000Z" })),
        popup(json!({ "id": 2, "savedAt": 1_700_000_000_000_i64 })),
        popup(json!({ "id": 3 })),
    ];
    sort_by_recency(&mut v);
    let ids: Vec<_> = v.iter().map(|p| p.numeric_id().unwrap()).collect();
    assert_eq!(ids, vec![2, 1, 3]);
}
