//! Minimal JSON-Schema subset validation
//!
//! Tool inputs and outputs are checked against the schemas declared in
//! their definitions. Only the subset those schemas actually use is
//! supported: `type`, `properties`, `required`, and `items`. A mismatch is
//! reported with the path to the offending value; nothing is ever coerced.

use serde_json::Value;

/// Validate `value` against `schema`, returning the first violation found.
pub fn validate(value: &Value, schema: &Value) -> Result<(), String> {
    validate_at(value, schema, "$")
}

fn validate_at(value: &Value, schema: &Value, path: &str) -> Result<(), String> {
    if let Some(expected) = schema.get("type").and_then(Value::as_str) {
        if !type_matches(value, expected) {
            return Err(format!(
                "{}: expected {}, got {}",
                path,
                expected,
                type_name(value)
            ));
        }
    }

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        if let Some(obj) = value.as_object() {
            for key in required.iter().filter_map(Value::as_str) {
                if !obj.contains_key(key) {
                    return Err(format!("{}: missing required field '{}'", path, key));
                }
            }
        }
    }

    if let Some(props) = schema.get("properties").and_then(Value::as_object) {
        if let Some(obj) = value.as_object() {
            for (key, subschema) in props {
                if let Some(field) = obj.get(key) {
                    validate_at(field, subschema, &format!("{}.{}", path, key))?;
                }
            }
        }
    }

    if let Some(items) = schema.get("items") {
        if let Some(arr) = value.as_array() {
            for (i, item) in arr.iter().enumerate() {
                validate_at(item, items, &format!("{}[{}]", path, i))?;
            }
        }
    }

    Ok(())
}

fn type_matches(value: &Value, expected: &str) -> bool {
    match expected {
        "object" => value.is_object(),
        "array" => value.is_array(),
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "null" => value.is_null(),
        _ => false,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_conforming_object() {
        let schema = json!({
            "type": "object",
            "properties": { "url": { "type": "string" } },
            "required": ["url"]
        });
        assert!(validate(&json!({ "url": "https://example.com" }), &schema).is_ok());
    }

    #[test]
    fn test_rejects_missing_required_field() {
        let schema = json!({
            "type": "object",
            "properties": { "url": { "type": "string" } },
            "required": ["url"]
        });
        let err = validate(&json!({}), &schema).unwrap_err();
        assert!(err.contains("missing required field 'url'"));
    }

    #[test]
    fn test_rejects_wrong_type() {
        let schema = json!({
            "type": "object",
            "properties": { "url": { "type": "string" } }
        });
        let err = validate(&json!({ "url": 42 }), &schema).unwrap_err();
        assert!(err.contains("$.url"));
        assert!(err.contains("expected string"));
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let schema = json!({
            "type": "object",
            "properties": {
                "innerHTML": { "type": "string" }
            }
        });
        assert!(validate(&json!({}), &schema).is_ok());
        assert!(validate(&json!({ "innerHTML": "<b>x</b>" }), &schema).is_ok());
    }

    #[test]
    fn test_array_items_validated() {
        let schema = json!({
            "type": "array",
            "items": {
                "type": "object",
                "required": ["tag"],
                "properties": { "tag": { "type": "string" } }
            }
        });
        assert!(validate(&json!([{ "tag": "a" }]), &schema).is_ok());

        let err = validate(&json!([{ "tag": "a" }, {}]), &schema).unwrap_err();
        assert!(err.contains("$[1]"));
    }

    #[test]
    fn test_nested_path_in_error() {
        let schema = json!({
            "type": "object",
            "properties": {
                "elements": {
                    "type": "array",
                    "items": { "type": "object" }
                }
            }
        });
        let err = validate(&json!({ "elements": ["oops"] }), &schema).unwrap_err();
        assert!(err.contains("$.elements[0]"));
    }

    #[test]
    fn test_unconstrained_schema_accepts_anything() {
        let schema = json!({});
        assert!(validate(&json!(null), &schema).is_ok());
        assert!(validate(&json!({ "a": [1, 2, 3] }), &schema).is_ok());
    }
}
