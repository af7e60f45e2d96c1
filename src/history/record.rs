use crate::session::Actor;
use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// The kind of mutation a history record describes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Create,
    Update,
    Delete,
    Reorder,
    Custom(String),
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryAction::Create => write!(f, "create"),
            HistoryAction::Update => write!(f, "update"),
            HistoryAction::Delete => write!(f, "delete"),
            HistoryAction::Reorder => write!(f, "reorder"),
            HistoryAction::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// A single field-level difference, with values rendered as JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl FieldChange {
    pub fn new(
        field: impl Into<String>,
        before: Option<&Value>,
        after: Option<&Value>,
    ) -> Self {
        Self {
            field: field.into(),
            before: before.map(|v| v.to_string()),
            after: after.map(|v| v.to_string()),
        }
    }
}

/// One audit-log entry appended next to a primary mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub entity_id: String,
    pub action: HistoryAction,
    pub actor: Option<Actor>,
    pub timestamp: DateTime<Utc>,
    pub summary: String,
    #[serde(default)]
    pub changes: Vec<FieldChange>,
}

impl HistoryRecord {
    pub fn new(entity_id: impl Into<String>, action: HistoryAction, summary: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity_id: entity_id.into(),
            action,
            actor: None,
            timestamp: Utc::now(),
            summary: summary.into(),
            changes: Vec::new(),
        }
    }

    pub fn with_actor(mut self, actor: Option<Actor>) -> Self {
        self.actor = actor;
        self
    }

    pub fn with_changes(mut self, changes: Vec<FieldChange>) -> Self {
        self.changes = changes;
        self
    }
}

/// Top-level field differences between two document bodies, in key order.
///
/// Non-object bodies are compared as a single field named `""`.
pub fn diff_documents(before: Option<&Value>, after: &Value) -> Vec<FieldChange> {
    match (before, after) {
        (Some(Value::Object(old)), Value::Object(new)) => old
            .keys()
            .chain(new.keys())
            .unique()
            .sorted()
            .filter(|key| old.get(*key) != new.get(*key))
            .map(|key| FieldChange::new(key.as_str(), old.get(key), new.get(key)))
            .collect(),
        (None, Value::Object(new)) => new
            .iter()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .map(|(key, value)| FieldChange::new(key.as_str(), None, Some(value)))
            .collect(),
        (old, new) if old != Some(new) => vec![FieldChange::new("", old, Some(new))],
        _ => Vec::new(),
    }
}
