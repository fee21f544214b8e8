use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type PopupId = i64;

/// A promotional popup record.
///
/// The fields the service reads are kept as raw JSON so that any record a
/// client sends can be stored and read back; nothing here rejects a value
/// for having the "wrong" type. Everything else (content, styling, ...)
/// lives in `extra` and is written back untouched, in the order it arrived.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Popup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Popup {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the store should match on. `null`, `0`, `false` and `""`
    /// count as "no id yet".
    pub fn assigned_id(&self) -> Option<&Value> {
        self.id.as_ref().filter(|v| is_truthy(v))
    }

    /// The id as an integer, when it is one.
    pub fn numeric_id(&self) -> Option<PopupId> {
        self.id.as_ref().and_then(Value::as_i64)
    }

    /// True for numeric ids equal to `id`. String ids never match.
    pub fn has_id(&self, id: PopupId) -> bool {
        match &self.id {
            Some(Value::Number(n)) => n.as_i64() == Some(id) || n.as_f64() == Some(id as f64),
            _ => false,
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Start bound. Only non-empty strings bound anything.
    pub fn start_bound(&self) -> Option<&str> {
        text_bound(self.start_date.as_ref())
    }

    /// End bound. Only non-empty strings bound anything.
    pub fn end_bound(&self) -> Option<&str> {
        text_bound(self.end_date.as_ref())
    }
}

fn text_bound(v: Option<&Value>) -> Option<&str> {
    v.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_fields_pass_through_in_order() {
        let raw = json!({
            "title": "Spring sale",
            "id": 7,
            "startDate": "2024-03-01",
            "style": { "color": "red" },
            "savedAt": "2024-02-28T10:00:00.000Z"
        });
        let popup: Popup = serde_json::from_value(raw).unwrap();
        assert_eq!(popup.numeric_id(), Some(7));
        assert_eq!(popup.start_bound(), Some("2024-03-01"));
        let keys: Vec<&str> = popup.extra.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["title", "style"]);

        let back = serde_json::to_value(&popup).unwrap();
        assert_eq!(back["style"]["color"], "red");
        assert_eq!(back["savedAt"], "2024-02-28T10:00:00.000Z");
        assert!(back.get("endDate").is_none());
    }

    #[test]
    fn loosely_typed_fields_are_kept_as_sent() {
        let raw = json!({ "id": "123", "savedAt": 1_700_000_000_000_i64, "endDate": 20240101 });
        let popup: Popup = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(popup.assigned_id(), Some(&json!("123")));
        assert_eq!(popup.numeric_id(), None);
        assert!(!popup.has_id(123));
        assert_eq!(popup.end_bound(), None);
        assert_eq!(serde_json::to_value(&popup).unwrap(), raw);
    }

    #[test]
    fn falsy_ids_count_as_missing() {
        for id in [json!(null), json!(0), json!(""), json!(false)] {
            let p: Popup = serde_json::from_value(json!({ "id": id, "name": "A" })).unwrap();
            assert_eq!(p.assigned_id(), None);
        }
    }

    #[test]
    fn empty_date_strings_are_unbounded() {
        let p: Popup = serde_json::from_value(json!({ "startDate": "", "endDate": null })).unwrap();
        assert_eq!(p.start_bound(), None);
        assert_eq!(p.end_bound(), None);
    }
}
