use crate::Popup;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde_json::Value;

/// `today` is inclusive on both ends; a missing bound is open.
///
/// Bounds are compared as strings against `YYYY-MM-DD`, so stored values
/// carrying a time suffix still order sensibly.
pub fn is_active(popup: &Popup, today: NaiveDate) -> bool {
    let today = today.format("%Y-%m-%d").to_string();
    if let Some(start) = popup.start_bound() {
        if today.as_str() < start {
            return false;
        }
    }
    if let Some(end) = popup.end_bound() {
        if today.as_str() > end {
            return false;
        }
    }
    true
}

pub fn filter_active(popups: &[Popup], today: NaiveDate) -> Vec<Popup> {
    popups
        .iter()
        .filter(|p| is_active(p, today))
        .cloned()
        .collect()
}

/// Newest `savedAt` first. Records without one, or with one that does not
/// parse, sort as the epoch. Equal keys keep their relative order.
/// A numeric `savedAt` is taken as epoch milliseconds.
pub fn sort_by_recency(popups: &mut [Popup]) {
    popups.sort_by_key(|p| std::cmp::Reverse(saved_at_millis(p)));
}

pub fn saved_at_millis(popup: &Popup) -> i64 {
    match &popup.saved_at {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => parse_timestamp(s).unwrap_or(0),
        _ => 0,
    }
}

fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    // no offset and a time part: wall-clock time on this host
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Local
            .from_local_datetime(&dt)
            .earliest()
            .map(|d| d.timestamp_millis());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_formats() {
        assert_eq!(parse_timestamp("1970-01-01T00:00:01.000Z"), Some(1_000));
        let local = Local.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).earliest().unwrap();
        assert_eq!(
            parse_timestamp("2024-01-01T09:30:00"),
            Some(local.timestamp_millis())
        );
        assert_eq!(parse_timestamp("1970-01-02"), Some(86_400_000));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn numeric_saved_at_is_epoch_millis() {
        let p = Popup {
            saved_at: Some(Value::from(1_700_000_000_000_i64)),
            ..Popup::new()
        };
        assert_eq!(saved_at_millis(&p), 1_700_000_000_000);
        let p = Popup {
            saved_at: Some(Value::Bool(true)),
            ..Popup::new()
        };
        assert_eq!(saved_at_millis(&p), 0);
    }
}
