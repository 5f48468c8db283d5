//! Emotion entries and their presentation palette.
//!
//! The `emociones` column stores either bare label strings or structured
//! `{emocion, intensidad}` objects, sometimes wrapped in a JSON-encoded
//! string. [`decode_emotions`] normalizes all of that into [`EmotionEntry`]
//! values, and [`EmotionEntry::display`] collapses an entry into a labeled,
//! styled form for the records browser.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;
use utoipa::ToSchema;

/// One stored emotion entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum EmotionEntry {
    /// A bare label, e.g. `"Alegría"`.
    Label(String),
    /// A structured entry with optional name and intensity parts.
    Detailed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        emocion: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        intensidad: Option<String>,
    },
}

/// Presentation styling for an emotion, keyed off the Plutchik wheel.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EmotionPalette {
    pub card: &'static str,
    pub badge: &'static str,
    pub indicator: &'static str,
}

/// An emotion entry resolved for display.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ParsedEmotion {
    pub label: String,
    pub palette: EmotionPalette,
}

/// Neutral style for labels that match no wheel entry.
pub const DEFAULT_PALETTE: EmotionPalette = EmotionPalette {
    card: "border-l-4 border-l-transparent",
    badge: "bg-purple-50 text-purple-700 border-purple-200",
    indicator: "bg-muted-foreground/60",
};

/// Plutchik wheel primary emotions with their intensity-level synonyms.
const PALETTE_TABLE: &[(&[&str], EmotionPalette)] = &[
    (
        &["Alegría", "Serenidad", "Éxtasis", "Felicidad", "Gozo"],
        EmotionPalette {
            card: "bg-yellow-50 border-l-4 border-l-yellow-500",
            badge: "bg-yellow-100 text-yellow-900 border-yellow-300",
            indicator: "bg-yellow-400",
        },
    ),
    (
        &["Confianza", "Aceptación", "Admiración", "Esperanza"],
        EmotionPalette {
            card: "bg-emerald-50 border-l-4 border-l-emerald-500",
            badge: "bg-emerald-100 text-emerald-800 border-emerald-300",
            indicator: "bg-emerald-400",
        },
    ),
    (
        &["Miedo", "Aprensión", "Terror", "Ansiedad", "Pánico"],
        EmotionPalette {
            card: "bg-green-50 border-l-4 border-l-green-700",
            badge: "bg-green-100 text-green-800 border-green-300",
            indicator: "bg-green-600",
        },
    ),
    (
        &["Sorpresa", "Distracción", "Asombro", "Confusión"],
        EmotionPalette {
            card: "bg-cyan-50 border-l-4 border-l-cyan-500",
            badge: "bg-cyan-100 text-cyan-800 border-cyan-300",
            indicator: "bg-cyan-500",
        },
    ),
    (
        &["Tristeza", "Pensativo", "Pena", "Soledad", "Melancolía"],
        EmotionPalette {
            card: "bg-blue-50 border-l-4 border-l-blue-600",
            badge: "bg-blue-100 text-blue-800 border-blue-300",
            indicator: "bg-blue-500",
        },
    ),
    (
        &["Disgusto", "Aburrimiento", "Aversión", "Rechazo"],
        EmotionPalette {
            card: "bg-purple-50 border-l-4 border-l-purple-600",
            badge: "bg-purple-100 text-purple-800 border-purple-300",
            indicator: "bg-purple-500",
        },
    ),
    (
        &["Ira", "Molestia", "Furia", "Rabia"],
        EmotionPalette {
            card: "bg-red-50 border-l-4 border-l-red-600",
            badge: "bg-red-100 text-red-800 border-red-300",
            indicator: "bg-red-500",
        },
    ),
    (
        &["Anticipación", "Interés", "Vigilancia", "Expectativa"],
        EmotionPalette {
            card: "bg-orange-50 border-l-4 border-l-orange-500",
            badge: "bg-orange-100 text-orange-800 border-orange-300",
            indicator: "bg-orange-500",
        },
    ),
];

static PALETTE_LOOKUP: LazyLock<HashMap<String, &'static EmotionPalette>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (keys, palette) in PALETTE_TABLE {
        for key in *keys {
            map.insert(normalize_key(key), palette);
        }
    }
    map
});

/// Lowercase and strip Spanish accents so "Miedo", "miedo" and "MIEDO" all
/// hit the same palette entry.
fn normalize_key(value: &str) -> String {
    value
        .trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Resolve a label to its palette, falling back to the neutral default.
pub fn palette_for(label: &str) -> EmotionPalette {
    PALETTE_LOOKUP
        .get(&normalize_key(label))
        .map(|palette| (*palette).clone())
        .unwrap_or(DEFAULT_PALETTE)
}

impl EmotionEntry {
    /// Collapse this entry into a display label and palette.
    ///
    /// Structured entries with both parts render as `"emocion (intensidad)"`;
    /// with one part, that part alone. Entries with neither part yield
    /// `None`. The palette lookup prefers the emotion name over the
    /// intensity.
    pub fn display(&self) -> Option<ParsedEmotion> {
        match self {
            EmotionEntry::Label(label) => Some(ParsedEmotion {
                label: label.clone(),
                palette: palette_for(label),
            }),
            EmotionEntry::Detailed {
                emocion,
                intensidad,
            } => {
                let label = match (emocion, intensidad) {
                    (Some(e), Some(i)) => format!("{e} ({i})"),
                    (Some(e), None) => e.clone(),
                    (None, Some(i)) => i.clone(),
                    (None, None) => return None,
                };
                let key = emocion.as_deref().or(intensidad.as_deref())?;
                Some(ParsedEmotion {
                    label,
                    palette: palette_for(key),
                })
            }
        }
    }
}

/// Decode a raw stored `emociones` value into entries.
///
/// Same decode-or-wrap policy as tag sets: native arrays are used as-is,
/// JSON-encoded strings are decoded and recursed, anything else is empty.
pub fn decode_emotions(value: &Value) -> Vec<EmotionEntry> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => {
                    let trimmed = s.trim();
                    (!trimmed.is_empty()).then(|| EmotionEntry::Label(trimmed.to_string()))
                }
                Value::Object(_) => serde_json::from_value(item.clone()).ok(),
                _ => None,
            })
            .collect(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Vec::new();
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(parsed @ Value::Array(_)) => decode_emotions(&parsed),
                _ => vec![EmotionEntry::Label(trimmed.to_string())],
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
    fn accent_and_case_insensitive_lookup() {
        assert_eq!(palette_for("miedo"), palette_for("Miedo"));
        assert_eq!(palette_for("alegria"), palette_for("Alegría"));
        assert_eq!(palette_for("PANICO"), palette_for("Pánico"));
    }

    #[test]
    fn unknown_label_gets_default_palette() {
        assert_eq!(palette_for("Nostalgia"), DEFAULT_PALETTE);
    }

    #[test]
    fn bare_label_displays_as_is() {
        let parsed = EmotionEntry::Label("Ira".to_string()).display().unwrap();
        assert_eq!(parsed.label, "Ira");
        assert_eq!(parsed.palette, palette_for("Ira"));
    }

    #[test]
    fn structured_entry_formats_label() {
        let entry = EmotionEntry::Detailed {
            emocion: Some("Miedo".to_string()),
            intensidad: Some("Terror".to_string()),
        };
        let parsed = entry.display().unwrap();
        assert_eq!(parsed.label, "Miedo (Terror)");
        assert_eq!(parsed.palette, palette_for("Miedo"));
    }

    #[test]
    fn structured_entry_with_one_part() {
        let entry = EmotionEntry::Detailed {
            emocion: None,
            intensidad: Some("Serenidad".to_string()),
        };
        let parsed = entry.display().unwrap();
        assert_eq!(parsed.label, "Serenidad");
        assert_eq!(parsed.palette, palette_for("Alegría"));
    }

    #[test]
    fn empty_structured_entry_is_skipped() {
        let entry = EmotionEntry::Detailed {
            emocion: None,
            intensidad: None,
        };
        assert_eq!(entry.display(), None);
    }

    #[test]
    fn decodes_mixed_array() {
        let value = json!(["Alegría", {"emocion": "Miedo", "intensidad": "Terror"}]);
        let entries = decode_emotions(&value);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], EmotionEntry::Label("Alegría".to_string()));
        assert_eq!(
            entries[1],
            EmotionEntry::Detailed {
                emocion: Some("Miedo".to_string()),
                intensidad: Some("Terror".to_string()),
            }
        );
    }

    #[test]
    fn decodes_json_encoded_string() {
        let value = json!(r#"["Ira"]"#);
        assert_eq!(
            decode_emotions(&value),
            vec![EmotionEntry::Label("Ira".to_string())]
        );
    }

    #[test]
    fn null_decodes_to_empty() {
        assert_eq!(decode_emotions(&Value::Null), Vec::new());
    }
}
