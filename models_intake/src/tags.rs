//! Decoding of stored tag-set values.
//!
//! Tag columns have carried three shapes across schema revisions: a native
//! JSON array of strings, a JSON-encoded string holding an array, or a bare
//! string. Everything funnels through [`decode_string_array`] exactly once at
//! the persistence boundary so the rest of the service only ever sees
//! `Vec<String>`.

use serde_json::Value;

/// Decode a raw stored tag value into a uniform list of non-blank labels.
///
/// Items inside arrays are stringified where possible, trimmed, and blank
/// entries are dropped. Decoding an already-decoded array is a no-op.
pub fn decode_string_array(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .filter(|item| !item.is_empty())
            .collect(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Vec::new();
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(parsed @ Value::Array(_)) => decode_string_array(&parsed),
                // Not an encoded array: the bare string is itself one label.
                _ => vec![trimmed.to_string()],
            }
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn decodes_native_array() {
        let value = json!(["Salud mental", " Consumo ", ""]);
        assert_eq!(
            decode_string_array(&value),
            vec!["Salud mental".to_string(), "Consumo".to_string()]
        );
    }

    #[test]
    fn decodes_json_encoded_string() {
        let value = json!(r#"["Alegría","Tristeza"]"#);
        assert_eq!(
            decode_string_array(&value),
            vec!["Alegría".to_string(), "Tristeza".to_string()]
        );
    }

    #[test]
    fn wraps_bare_string() {
        assert_eq!(decode_string_array(&json!("Ira")), vec!["Ira".to_string()]);
    }

    #[test]
    fn null_and_blank_decode_to_empty() {
        assert_eq!(decode_string_array(&Value::Null), Vec::<String>::new());
        assert_eq!(decode_string_array(&json!("   ")), Vec::<String>::new());
    }

    #[test]
    fn decode_is_idempotent() {
        let decoded = decode_string_array(&json!(["Vivienda", "Empleo"]));
        let redecoded = decode_string_array(&json!(decoded.clone()));
        assert_eq!(decoded, redecoded);
    }

    #[test]
    fn stringifies_non_string_items() {
        let value = json!([3, true, "x", {"k": 1}]);
        assert_eq!(
            decode_string_array(&value),
            vec!["3".to_string(), "true".to_string(), "x".to_string()]
        );
    }

    #[test]
    fn nested_encoded_array_recurses() {
        let value = json!("[\"[\\\"a\\\"]\"]");
        // Inner items are strings; the outer decode keeps them as labels.
        assert_eq!(decode_string_array(&value), vec!["[\"a\"]".to_string()]);
    }
}
