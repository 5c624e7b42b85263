use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lenient::{number_text, scalar_text};

/// A reference to another entity as the API serializes it.
///
/// Depending on the endpoint the same field arrives as a bare numeric id,
/// a string id, or the embedded entity object. Every comparison or grouping
/// goes through [`normalize`] rather than matching on the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    Number(serde_json::Number),
    Text(String),
    Object(Map<String, Value>),
    Other(Value),
}

impl Reference {
    /// Canonical string id: the embedded `id` for objects, the id itself
    /// otherwise, `""` when no id can be extracted.
    pub fn normalized_id(&self) -> String {
        match self {
            Reference::Number(n) => number_text(n),
            Reference::Text(s) => s.clone(),
            Reference::Object(map) => map.get("id").map(scalar_text).unwrap_or_default(),
            Reference::Other(_) => String::new(),
        }
    }

    /// The embedded entity's `name`, if the reference carries the object.
    pub fn embedded_name(&self) -> Option<&str> {
        match self {
            Reference::Object(map) => map.get("name").and_then(Value::as_str),
            _ => None,
        }
    }
}

impl From<String> for Reference {
    fn from(id: String) -> Self {
        Reference::Text(id)
    }
}

impl From<&str> for Reference {
    fn from(id: &str) -> Self {
        Reference::Text(id.to_string())
    }
}

impl From<i64> for Reference {
    fn from(id: i64) -> Self {
        Reference::Number(id.into())
    }
}

/// Normalize an optional reference to a string id, `""` when absent.
pub fn normalize(reference: Option<&Reference>) -> String {
    reference.map(Reference::normalized_id).unwrap_or_default()
}
