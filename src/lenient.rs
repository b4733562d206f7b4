//! Tolerant field deserializers for modeling-tool documents.
//!
//! Schema documents are hand-edited and partially filled: a flag may arrive
//! as `"true"`, a precision as `""`, an options object as a one-element
//! array. Every helper here maps a malformed value to "absent" instead of
//! failing the enclosing node.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Non-empty string. Numbers are accepted and printed as written.
pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Non-negative integer qualifier (length, precision, size).
pub fn number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value))
}

fn as_number(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Boolean flag, defaulting to false.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_flag(&value).unwrap_or(false))
}

fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// `isActivated`: anything but an explicit false keeps the element live.
pub fn activation<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_flag(&value).unwrap_or(true))
}

pub fn activated() -> bool {
    true
}

/// Nested object, or the first element when the tool stored it as a list.
/// Falls back to `T::default()` on any shape mismatch.
pub fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(project(value).unwrap_or_default())
}

/// Like [`object`], but keeps absence (and `null`) distinguishable.
pub fn optional_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::Array(ref items) if items.is_empty() => None,
        Value::Object(ref map) if map.is_empty() => None,
        other => Some(project(other).unwrap_or_default()),
    })
}

fn project<T: DeserializeOwned>(value: Value) -> Option<T> {
    let value = match value {
        Value::Array(items) => items.into_iter().next()?,
        other => other,
    };
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::warn!(target: "oraddl::hydrate", %err, "ignoring malformed nested object");
            None
        }
    }
}

/// List of `T`. A lone object counts as a one-element list; elements that
/// fail to project are dropped.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Array(items) => items,
        obj @ Value::Object(_) => vec![obj],
        _ => Vec::new(),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::warn!(target: "oraddl::hydrate", %err, "dropping malformed list entry");
                None
            }
        })
        .collect())
}

/// Ordered name-to-node map. Entries that fail to project are dropped.
pub fn map<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Object(entries) = value else {
        return Ok(IndexMap::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|(name, node)| match serde_json::from_value(node) {
            Ok(parsed) => Some((name, parsed)),
            Err(err) => {
                tracing::warn!(target: "oraddl::hydrate", %name, %err, "dropping malformed entry");
                None
            }
        })
        .collect())
}

/// List of strings, tolerating a single string.
pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) => vec![s],
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct Inner {
        #[serde(default, deserialize_with = "string")]
        label: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "string")]
        name: Option<String>,
        #[serde(default, deserialize_with = "number")]
        size: Option<u32>,
        #[serde(default, deserialize_with = "flag")]
        on: bool,
        #[serde(default = "activated", deserialize_with = "activation")]
        live: bool,
        #[serde(default, deserialize_with = "object")]
        inner: Inner,
        #[serde(default, deserialize_with = "list")]
        many: Vec<Inner>,
    }

    fn probe(value: serde_json::Value) -> Probe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_absent_fields_take_defaults() {
        let p = probe(json!({}));
        assert_eq!(p.name, None);
        assert_eq!(p.size, None);
        assert!(!p.on);
        assert!(p.live);
        assert!(p.many.is_empty());
    }

    #[test]
    fn test_wrong_types_become_absent() {
        let p = probe(json!({
            "name": "",
            "size": "abc",
            "on": {},
            "live": "maybe",
            "inner": 42,
            "many": "nope"
        }));
        assert_eq!(p.name, None);
        assert_eq!(p.size, None);
        assert!(!p.on);
        assert!(p.live);
        assert_eq!(p.inner.label, None);
        assert!(p.many.is_empty());
    }

    #[test]
    fn test_coercions() {
        let p = probe(json!({
            "name": 12,
            "size": "20",
            "on": "true",
            "live": false,
            "inner": [{ "label": "first" }, { "label": "second" }],
            "many": { "label": "solo" }
        }));
        assert_eq!(p.name.as_deref(), Some("12"));
        assert_eq!(p.size, Some(20));
        assert!(p.on);
        assert!(!p.live);
        assert_eq!(p.inner.label.as_deref(), Some("first"));
        assert_eq!(p.many.len(), 1);
    }
}
