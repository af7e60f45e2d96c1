use super::StructureValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The semantic kind of a field in a collection canvas structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Null,
    Array,
    Map,
}

impl FieldType {
    /// Arrays and maps hold children; every other kind is a leaf.
    pub fn is_container(self) -> bool {
        matches!(self, FieldType::Array | FieldType::Map)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Null => "null",
            FieldType::Array => "array",
            FieldType::Map => "map",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Infers the field type of a structure value. Total over every input.
pub fn classify(value: &StructureValue) -> FieldType {
    match value {
        StructureValue::Array(_) => FieldType::Array,
        StructureValue::Null => FieldType::Null,
        StructureValue::Map(_) => FieldType::Map,
        StructureValue::Number(_) => FieldType::Number,
        StructureValue::Boolean(_) => FieldType::Boolean,
        StructureValue::String(_) => FieldType::String,
    }
}

/// Same rules as [`classify`], applied directly to raw JSON.
pub fn classify_json(value: &serde_json::Value) -> FieldType {
    match value {
        serde_json::Value::Array(_) => FieldType::Array,
        serde_json::Value::Null => FieldType::Null,
        serde_json::Value::Object(_) => FieldType::Map,
        serde_json::Value::Number(_) => FieldType::Number,
        serde_json::Value::Bool(_) => FieldType::Boolean,
        serde_json::Value::String(_) => FieldType::String,
    }
}
