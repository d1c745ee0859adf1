use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How strictly persisted records are checked when rebuilding items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Coerce missing or mistyped fields to usable values
    #[default]
    Lenient,
    /// Reject any record whose fields are missing or mistyped
    Strict,
}

/// Error type for rebuilding an item from an untrusted record
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("record is not an object")]
    NotAnObject,
    #[error("field `{field}` is missing or not a {expected}")]
    BadField {
        field: &'static str,
        expected: &'static str,
    },
}

/// A single list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Stable unique id, never changed after creation
    pub id: String,
    /// Item text
    pub text: String,
    /// Completion flag
    pub completed: bool,
    /// Sort key; smaller sorts first, gaps allowed
    pub order: f64,
}

impl Item {
    /// Create a new, not yet completed item ordered at `order`.
    ///
    /// The caller trims `text` and rejects empty input.
    pub fn create(id: String, text: String, order: f64) -> Self {
        Item {
            id,
            text,
            completed: false,
            order,
        }
    }

    /// Rebuild an item from a loosely typed record, e.g. one element of
    /// the persisted JSON array.
    pub fn from_untrusted(record: &Value, mode: ValidationMode) -> Result<Item, RecordError> {
        let obj = record.as_object().ok_or(RecordError::NotAnObject)?;
        match mode {
            ValidationMode::Strict => {
                let id = obj
                    .get("id")
                    .and_then(Value::as_str)
                    .ok_or(RecordError::BadField {
                        field: "id",
                        expected: "string",
                    })?;
                let text = obj
                    .get("text")
                    .and_then(Value::as_str)
                    .ok_or(RecordError::BadField {
                        field: "text",
                        expected: "string",
                    })?;
                let completed = obj
                    .get("completed")
                    .and_then(Value::as_bool)
                    .ok_or(RecordError::BadField {
                        field: "completed",
                        expected: "boolean",
                    })?;
                let order = obj
                    .get("order")
                    .and_then(Value::as_f64)
                    .ok_or(RecordError::BadField {
                        field: "order",
                        expected: "number",
                    })?;
                Ok(Item {
                    id: id.to_string(),
                    text: text.to_string(),
                    completed,
                    order,
                })
            }
            ValidationMode::Lenient => Ok(Item {
                id: coerce_id(obj.get("id")),
                text: coerce_text(obj.get("text")),
                completed: obj.get("completed").is_some_and(truthy),
                order: coerce_order(obj.get("order")),
            }),
        }
    }
}

/// Generate a fresh random item id
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current time in milliseconds since the Unix epoch, used as an order key
pub fn now_millis() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64
}

fn coerce_id(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => new_id(),
    }
}

fn coerce_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn coerce_order(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// JavaScript-style truthiness of a JSON value
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_is_not_completed() {
        let item = Item::create("a".into(), "Buy milk".into(), 10.0);
        assert_eq!(item.id, "a");
        assert_eq!(item.text, "Buy milk");
        assert!(!item.completed);
        assert_eq!(item.order, 10.0);
    }

    #[test]
    fn new_ids_are_distinct() {
        assert_ne!(new_id(), new_id());
    }

    #[test]
    fn well_formed_record_is_identical_in_both_modes() {
        let record = json!({"id": "x1", "text": "Write report", "completed": true, "order": 42});
        let expected = Item {
            id: "x1".into(),
            text: "Write report".into(),
            completed: true,
            order: 42.0,
        };
        assert_eq!(Item::from_untrusted(&record, ValidationMode::Lenient).unwrap(), expected);
        assert_eq!(Item::from_untrusted(&record, ValidationMode::Strict).unwrap(), expected);
    }

    #[test]
    fn lenient_coerces_mistyped_fields() {
        let record = json!({"id": 7, "text": false, "completed": "yes", "order": "12.5"});
        let item = Item::from_untrusted(&record, ValidationMode::Lenient).unwrap();
        assert_eq!(item.id, "7");
        assert_eq!(item.text, "false");
        assert!(item.completed);
        assert_eq!(item.order, 12.5);
    }

    #[test]
    fn lenient_defaults_missing_fields() {
        let item = Item::from_untrusted(&json!({}), ValidationMode::Lenient).unwrap();
        assert!(!item.id.is_empty());
        assert_eq!(item.text, "");
        assert!(!item.completed);
        assert_eq!(item.order, 0.0);
    }

    #[test]
    fn lenient_completed_follows_truthiness() {
        for (value, expected) in [
            (json!(0), false),
            (json!(1), true),
            (json!(""), false),
            (json!("x"), true),
            (json!(null), false),
            (json!([]), true),
        ] {
            let record = json!({"id": "a", "text": "t", "completed": value, "order": 1});
            let item = Item::from_untrusted(&record, ValidationMode::Lenient).unwrap();
            assert_eq!(item.completed, expected, "completed = {}", record["completed"]);
        }
    }

    #[test]
    fn strict_names_the_bad_field() {
        let record = json!({"id": "a", "text": "t", "completed": "no", "order": 1});
        let err = Item::from_untrusted(&record, ValidationMode::Strict).unwrap_err();
        assert_eq!(
            err,
            RecordError::BadField {
                field: "completed",
                expected: "boolean"
            }
        );

        let record = json!({"id": "a", "text": "t", "completed": false});
        let err = Item::from_untrusted(&record, ValidationMode::Strict).unwrap_err();
        assert!(err.to_string().contains("`order`"));
    }

    #[test]
    fn non_object_rejected_in_both_modes() {
        for mode in [ValidationMode::Lenient, ValidationMode::Strict] {
            assert_eq!(
                Item::from_untrusted(&json!("text"), mode),
                Err(RecordError::NotAnObject)
            );
        }
    }
}
