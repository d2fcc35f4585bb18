use serde_json::Value;

use crate::error::Error;

/// Keys every item must carry; only their presence is checked
pub const REQUIRED_FIELDS: [&str; 2] = ["name", "description"];

/// Check that `candidate` carries every required field
///
/// Fails with [`Error::TypeMismatch`] when `candidate` is not a JSON object.
/// Values are not inspected: empty strings, `null` and non-strings all count
/// as present.
pub fn validate_item(candidate: &Value) -> Result<bool, Error> {
    let fields = candidate
        .as_object()
        .ok_or_else(|| Error::TypeMismatch("Input must be a mapping".to_string()))?;

    Ok(REQUIRED_FIELDS.iter().all(|field| fields.contains_key(*field)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_both_fields_present() {
        assert!(validate_item(&json!({"name": "a", "description": "b"})).unwrap());
    }

    #[test]
    fn test_any_values_accepted() {
        assert!(validate_item(&json!({"name": "", "description": null})).unwrap());
        assert!(validate_item(&json!({"name": 1, "description": [true]})).unwrap());
        assert!(validate_item(&json!({"name": {}, "description": false, "extra": 3})).unwrap());
    }

    #[test]
    fn test_missing_fields() {
        assert!(!validate_item(&json!({})).unwrap());
        assert!(!validate_item(&json!({"name": "a"})).unwrap());
        assert!(!validate_item(&json!({"description": "b"})).unwrap());
        assert!(!validate_item(&json!({"Name": "a", "Description": "b"})).unwrap());
    }

    #[test]
    fn test_non_mapping_is_type_mismatch() {
        for candidate in [
            json!(null),
            json!("name"),
            json!(42),
            json!(["name", "description"]),
            json!(true),
        ] {
            let err = validate_item(&candidate).unwrap_err();
            assert!(err.is_type_mismatch(), "{candidate} should be rejected");
        }
    }
}
