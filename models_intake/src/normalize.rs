//! Lenient coercion helpers for API input.
//!
//! The form layer submits whatever the browser had in its inputs: numeric
//! fields arrive as numbers, numeric strings or empty strings; tag sets
//! arrive as arrays, JSON-encoded strings or nothing at all. These helpers
//! sit behind `deserialize_with` on [`crate::api::BeneficiaryInput`] and keep
//! absence (field not in the payload) distinct from an explicit null so the
//! same input shape serves both insert and partial update.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::emotions::{self, EmotionEntry};
use crate::tags;

/// Plain PATCH field: absent → outer `None` (via `#[serde(default)]`),
/// explicit null → `Some(None)`, value → `Some(Some(v))`.
pub fn patch_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::<T>::deserialize(deserializer)?))
}

/// Numeric score field: empty string, null, unparseable or non-finite input
/// all coerce to NULL; numbers and numeric strings parse.
pub fn number_or_null<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(coerce_number(&value)))
}

/// `caso_numero`: lenient positive integer (number or numeric string).
pub fn case_number_or_null<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(coerce_integer(&value)))
}

/// Text field where the empty string means "no value".
pub fn text_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(Some(value.filter(|s| !s.is_empty())))
}

/// Tag set: present value decodes to an array, whatever its stored shape.
pub fn tags_or_empty<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(tags::decode_string_array(&value)))
}

/// Emotions: same decode-or-empty policy as tag sets.
pub fn emotions_or_empty<'de, D>(deserializer: D) -> Result<Option<Vec<EmotionEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(emotions::decode_emotions(&value)))
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<i64>().ok()
        }
        _ => None,
    }
}

/// Uppercase the first character, leaving the rest untouched.
/// Gender values are capitalized on write.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn number_coercion() {
        assert_eq!(coerce_number(&json!(3.5)), Some(3.5));
        assert_eq!(coerce_number(&json!("4")), Some(4.0));
        assert_eq!(coerce_number(&json!(" 2.25 ")), Some(2.25));
        assert_eq!(coerce_number(&json!("")), None);
        assert_eq!(coerce_number(&json!("n/a")), None);
        assert_eq!(coerce_number(&Value::Null), None);
    }

    #[test]
    fn integer_coercion() {
        assert_eq!(coerce_integer(&json!(7)), Some(7));
        assert_eq!(coerce_integer(&json!("12")), Some(12));
        assert_eq!(coerce_integer(&json!("doce")), None);
        assert_eq!(coerce_integer(&Value::Null), None);
    }

    #[test]
    fn capitalize_first_char_only() {
        assert_eq!(capitalize("femenino"), "Femenino");
        assert_eq!(capitalize("no binario"), "No binario");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("Ya Capitalizado"), "Ya Capitalizado");
    }

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "patch_field")]
        nombre: Option<Option<String>>,
        #[serde(default, deserialize_with = "number_or_null")]
        puntaje: Option<Option<f64>>,
    }

    #[test]
    fn absence_differs_from_null() {
        let absent: Probe = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.nombre, None);
        assert_eq!(absent.puntaje, None);

        let null: Probe =
            serde_json::from_value(json!({ "nombre": null, "puntaje": "" })).unwrap();
        assert_eq!(null.nombre, Some(None));
        assert_eq!(null.puntaje, Some(None));

        let set: Probe =
            serde_json::from_value(json!({ "nombre": "Ana", "puntaje": "8" })).unwrap();
        assert_eq!(set.nombre, Some(Some("Ana".to_string())));
        assert_eq!(set.puntaje, Some(Some(8.0)));
    }
}
