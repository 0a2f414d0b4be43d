//! Text normalization and property lookup helpers shared by identity
//! derivation and ingestion.

use serde_json::{Map, Value};

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_inline_whitespace<T: AsRef<str>>(text: T) -> String {
    let mut normalized = String::new();
    let mut seen_space = false;
    for ch in text.as_ref().chars() {
        if ch.is_whitespace() {
            if !seen_space {
                normalized.push(' ');
                seen_space = true;
            }
        } else {
            normalized.push(ch);
            seen_space = false;
        }
    }
    normalized.trim().to_string()
}

/// Canonicalize a name for identity keys: lowercase, trimmed, inner
/// whitespace collapsed.
pub fn normalize_name<T: AsRef<str>>(name: T) -> String {
    normalize_inline_whitespace(name.as_ref().to_lowercase())
}

/// Return the first candidate key whose property value is present and
/// non-empty, rendered as a string.
///
/// Keys are tried in priority order; numeric values (OSM ids come through
/// as numbers) are rendered via their JSON display form.
pub fn first_present(properties: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    for key in keys {
        match properties.get(*key) {
            Some(Value::String(text)) if !text.trim().is_empty() => {
                return Some(text.clone());
            }
            Some(Value::Number(number)) => return Some(number.to_string()),
            _ => continue,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn whitespace_is_collapsed_and_trimmed() {
        assert_eq!(normalize_inline_whitespace("  a \t b\n\nc  "), "a b c");
    }

    #[test]
    fn names_are_case_and_whitespace_normalized() {
        assert_eq!(normalize_name("  Rafah   CROSSING "), "rafah crossing");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn first_present_respects_priority_order() {
        let properties = props(json!({"name": "al-Shifa", "NAME": "AL-SHIFA"}));
        assert_eq!(
            first_present(&properties, &["name", "NAME"]),
            Some("al-Shifa".to_string())
        );
    }

    #[test]
    fn first_present_skips_empty_and_missing_values() {
        let properties = props(json!({"id": "", "@id": "   ", "osm_id": 4305157022_u64}));
        assert_eq!(
            first_present(&properties, &["id", "@id", "osm_id"]),
            Some("4305157022".to_string())
        );
        assert_eq!(first_present(&properties, &["ref"]), None);
    }
}
