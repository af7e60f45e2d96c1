use super::{HistoryAction, HistoryLog, HistoryPolicy, HistoryRecord, diff_documents};
use crate::error::{HistoryError, StoreError};
use crate::session::SessionContext;
use crate::store::DocumentStore;
use serde_json::Value;
use tracing::{debug, warn};

/// Collection that holds one history document per mutated entity.
pub const HISTORY_COLLECTION: &str = "history";

/// A primary write plus the description of it that goes into the history log.
#[derive(Debug, Clone)]
pub struct Mutation {
    pub collection: String,
    pub id: String,
    /// Ignored for [`HistoryAction::Delete`].
    pub document: Value,
    pub action: HistoryAction,
    pub summary: String,
}

impl Mutation {
    pub fn new(
        collection: impl Into<String>,
        id: impl Into<String>,
        document: Value,
        action: HistoryAction,
    ) -> Self {
        let action_name = action.to_string();
        Self {
            collection: collection.into(),
            id: id.into(),
            document,
            action,
            summary: action_name,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }
}

/// What happened to the history half of a mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryWrite {
    Recorded,
    /// The primary write stands; the audit entry was lost.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    pub history: HistoryWrite,
}

impl MutationOutcome {
    pub fn history_recorded(&self) -> bool {
        self.history == HistoryWrite::Recorded
    }
}

/// Writes a document and then appends to its history log.
///
/// The two writes are not atomic. A failed primary write is returned as an error and nothing
/// is recorded; a failed history write is logged and surfaced in the outcome only.
#[derive(Debug, Clone, Default)]
pub struct HistoryRecorder {
    policy: HistoryPolicy,
}

impl HistoryRecorder {
    pub fn new(policy: HistoryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &HistoryPolicy {
        &self.policy
    }

    pub fn history_id(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }

    pub fn record_mutation(
        &self,
        store: &dyn DocumentStore,
        session: &SessionContext,
        mutation: Mutation,
    ) -> Result<MutationOutcome, StoreError> {
        let previous = store.get_document(&mutation.collection, &mutation.id)?;
        match mutation.action {
            HistoryAction::Delete => store.delete_document(&mutation.collection, &mutation.id)?,
            _ => store.set_document(&mutation.collection, &mutation.id, mutation.document.clone())?,
        }

        let history_id = Self::history_id(&mutation.collection, &mutation.id);
        let history = match self.append_history(store, session, &history_id, previous.as_ref(), &mutation) {
            Ok(()) => HistoryWrite::Recorded,
            Err(e) => {
                warn!(
                    history_id = %history_id,
                    action = %mutation.action,
                    error = %e,
                    "history write failed; primary write kept"
                );
                HistoryWrite::Failed(e.to_string())
            }
        };
        Ok(MutationOutcome { history })
    }

    /// Loads the stored history log for an entity; a missing document is an empty log.
    pub fn load(
        &self,
        store: &dyn DocumentStore,
        collection: &str,
        id: &str,
    ) -> Result<HistoryLog, HistoryError> {
        let history_id = Self::history_id(collection, id);
        match store.get_document(HISTORY_COLLECTION, &history_id)? {
            Some(raw) => serde_json::from_value(raw)
                .map_err(|e| HistoryError::Malformed(history_id, e.to_string())),
            None => Ok(HistoryLog::new(history_id)),
        }
    }

    fn append_history(
        &self,
        store: &dyn DocumentStore,
        session: &SessionContext,
        history_id: &str,
        previous: Option<&Value>,
        mutation: &Mutation,
    ) -> Result<(), HistoryError> {
        let mut log = self.load(store, &mutation.collection, &mutation.id)?;

        let actor = session.current();
        if actor.is_none() {
            debug!(history_id, "recording history without a signed-in actor");
        }
        let changes = match mutation.action {
            HistoryAction::Delete => Vec::new(),
            _ => diff_documents(previous, &mutation.document),
        };
        let record = HistoryRecord::new(mutation.id.clone(), mutation.action.clone(), mutation.summary.clone())
            .with_actor(actor)
            .with_changes(changes);
        log.push(record, &self.policy);

        let body = serde_json::to_value(&log).map_err(|e| HistoryError::Encode(e.to_string()))?;
        store.set_document(HISTORY_COLLECTION, history_id, body)?;
        Ok(())
    }
}
