//! Module argument coercion.
//!
//! Canonical parameters are flat string maps. Scalars are expanded into the
//! conventional argument of the module, collections are serialized to JSON.

use serde_yaml::Value;

use super::keywords::{KeywordTables, ScalarKind};
use crate::playbook::Params;

/// Build canonical parameters from the value attached to a module key.
pub fn coerce_params(module: &str, value: &Value, keywords: &KeywordTables) -> Params {
    let mut params = Params::new();

    match value {
        Value::Mapping(map) => {
            for (key, value) in map {
                params.insert(key_text(key), stringify(value));
            }
        }
        Value::String(s) => match keywords.scalar_kind(module) {
            ScalarKind::Command => {
                params.insert("cmd".to_string(), s.clone());
            }
            ScalarKind::Package => {
                params.insert("name".to_string(), s.clone());
                params.insert("state".to_string(), "present".to_string());
            }
            ScalarKind::FileTransfer => {
                params.insert("src".to_string(), String::new());
                params.insert("dest".to_string(), s.clone());
            }
            ScalarKind::Name => {
                params.insert("name".to_string(), s.clone());
            }
        },
        Value::Sequence(items) => {
            let joined = items.iter().map(stringify).collect::<Vec<_>>().join(", ");
            params.insert("items".to_string(), joined);
        }
        // `ping:` with no argument behaves like `ping: {}`
        Value::Null => {}
        Value::Tagged(tagged) => return coerce_params(module, &tagged.value, keywords),
        scalar => {
            params.insert("value".to_string(), stringify(scalar));
        }
    }

    params
}

/// Render a YAML value as a canonical parameter string.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(_) | Value::Mapping(_) => to_json(value).to_string(),
        Value::Tagged(tagged) => stringify(&tagged.value),
    }
}

/// Text of a mapping key; non-string keys use their scalar rendering.
pub fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => stringify(other),
    }
}

/// Convert a YAML value into JSON, stringifying non-string keys.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                serde_json::Value::from(i)
            } else if let Some(u) = n.as_u64() {
                serde_json::Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(serde_json::Value::Null, serde_json::Value::Number)
            }
        }
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Sequence(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Mapping(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| (key_text(k), to_json(v)))
                .collect(),
        ),
        Value::Tagged(tagged) => to_json(&tagged.value),
    }
}
