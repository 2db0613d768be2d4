//! Presence rules shared by merge, path writes, and field validation.
//!
//! A field is *present* when it carries a meaningful value. The rules are:
//!
//! | value            | present |
//! |------------------|---------|
//! | `null`           | no      |
//! | `false`          | no      |
//! | `""`             | no      |
//! | any number, `0`  | yes     |
//! | array            | yes     |
//! | object           | yes     |
//!
//! Numeric zero counts as present so that a legitimately-zero field is never
//! dropped by a merge or removed by a path write.

use serde_json::{Map, Value};

/// Ordered mapping of field name to value. Insertion order is preserved.
pub type Fields = Map<String, Value>;

pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(_) | Value::Array(_) | Value::Object(_) => true,
    }
}

/// Copy of `fields` with every absent leaf dropped.
///
/// Nested objects are cleaned recursively and kept only if something
/// survives inside them.
pub fn clean(fields: &Fields) -> Fields {
    let mut out = Fields::new();
    for (key, value) in fields {
        match value {
            Value::Object(nested) => {
                let cleaned = clean(nested);
                if !cleaned.is_empty() {
                    out.insert(key.clone(), Value::Object(cleaned));
                }
            }
            other if is_present(other) => {
                out.insert(key.clone(), other.clone());
            }
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn presence_rules() {
        assert!(!is_present(&Value::Null));
        assert!(!is_present(&json!(false)));
        assert!(!is_present(&json!("")));
        assert!(is_present(&json!(true)));
        assert!(is_present(&json!(0)));
        assert!(is_present(&json!("x")));
        assert!(is_present(&json!([])));
        assert!(is_present(&json!({})));
    }

    #[test]
    fn clean_drops_empty_leaves_and_objects() {
        let input = json!({
            "name": "app",
            "description": "",
            "count": 0,
            "flag": false,
            "gone": null,
            "icons": { "16": "", "48": "/icon48.png" },
            "activities": { "dhis": { "href": "" } },
        });
        let cleaned = clean(input.as_object().unwrap());
        assert_eq!(
            Value::Object(cleaned),
            json!({
                "name": "app",
                "count": 0,
                "icons": { "48": "/icon48.png" },
            })
        );
    }

    #[test]
    fn clean_preserves_key_order() {
        let input = json!({ "z": "1", "a": "2", "m": "3" });
        let cleaned = clean(input.as_object().unwrap());
        let keys: Vec<&str> = cleaned.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
