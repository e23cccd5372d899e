//! Loose decoding of an insert payload
//!
//! Request bodies are untyped JSON. Decoding never fails: anything that
//! cannot serve as a field value is treated as absent, and the validator
//! turns absence into the right error kind.

use serde_json::Value;

/// A not yet validated record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateRecord {
    /// Positive integer id, `None` when absent, zero, negative or unparseable
    pub id: Option<u64>,
    pub name: Option<String>,
    /// Raw type entries; non-string entries are kept as empty strings
    pub types: Vec<String>,
    pub image_url: Option<String>,
}

impl CandidateRecord {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        types: &[&str],
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            types: types.iter().map(|t| t.to_string()).collect(),
            image_url: Some(image_url.into()),
        }
    }

    /// Decodes a JSON payload. `url` is accepted in place of `imageUrl`.
    pub fn from_value(value: &Value) -> Self {
        let image_url = value
            .get("imageUrl")
            .or_else(|| value.get("url"))
            .and_then(non_empty_str);

        Self {
            id: value.get("id").and_then(positive_id),
            name: value.get("name").and_then(non_empty_str),
            types: value.get("types").map(type_entries).unwrap_or_default(),
            image_url,
        }
    }
}

fn positive_id(value: &Value) -> Option<u64> {
    let id = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f > 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    id.filter(|id| *id > 0)
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn type_entries(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|v| v.as_str().unwrap_or_default().to_string())
            .collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}
