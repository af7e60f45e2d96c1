use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The persisted map shape of a collection canvas structure.
pub type StructureMap = AHashMap<String, StructureValue>;

/// A recursively-typed document value as stored for a collection canvas.
///
/// Map entries carry no ordering; anything that presents them sorts explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StructureValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<StructureValue>),
    Map(StructureMap),
}

impl StructureValue {
    pub fn as_map(&self) -> Option<&StructureMap> {
        match self {
            StructureValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[StructureValue]> {
        match self {
            StructureValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Number of direct children for containers, zero for everything else.
    pub fn child_count(&self) -> usize {
        match self {
            StructureValue::Array(items) => items.len(),
            StructureValue::Map(map) => map.len(),
            _ => 0,
        }
    }
}

impl From<serde_json::Value> for StructureValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => StructureValue::Null,
            serde_json::Value::Bool(b) => StructureValue::Boolean(b),
            serde_json::Value::Number(n) => StructureValue::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => StructureValue::String(s),
            serde_json::Value::Array(items) => {
                StructureValue::Array(items.into_iter().map(StructureValue::from).collect())
            }
            serde_json::Value::Object(map) => StructureValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, StructureValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&serde_json::Value> for StructureValue {
    fn from(value: &serde_json::Value) -> Self {
        StructureValue::from(value.clone())
    }
}

impl fmt::Display for StructureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureValue::Null => write!(f, "null"),
            StructureValue::Boolean(b) => write!(f, "{}", b),
            StructureValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            StructureValue::String(s) => write!(f, "\"{}\"", s),
            StructureValue::Array(items) => write!(f, "[{} items]", items.len()),
            StructureValue::Map(map) => write!(f, "{{{} keys}}", map.len()),
        }
    }
}

/// Converts a raw JSON document body into a structure map.
///
/// Anything that is not a JSON object (including `null`) yields an empty map.
pub fn structure_from_json(value: &serde_json::Value) -> StructureMap {
    match value {
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(k, v)| (k.clone(), StructureValue::from(v)))
            .collect(),
        _ => StructureMap::new(),
    }
}
