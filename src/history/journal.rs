use super::{HistoryAction, HistoryRecord};
use crate::error::HistoryError;
use ahash::AHashMap;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};

/// Retention limits for a per-entity history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryPolicy {
    pub max_total: usize,
    pub max_per_action: usize,
}

impl HistoryPolicy {
    pub const DEFAULT_MAX_TOTAL: usize = 100;
    pub const DEFAULT_MAX_PER_ACTION: usize = 20;

    pub fn new(max_total: usize, max_per_action: usize) -> Self {
        Self {
            max_total,
            max_per_action,
        }
    }
}

impl Default for HistoryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_TOTAL, Self::DEFAULT_MAX_PER_ACTION)
    }
}

/// The bounded history of one entity, oldest record first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryLog {
    pub entity_id: String,
    #[serde(default)]
    pub records: Vec<HistoryRecord>,
}

impl HistoryLog {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            records: Vec::new(),
        }
    }

    /// Appends a record, then trims the log back within `policy`.
    pub fn push(&mut self, record: HistoryRecord, policy: &HistoryPolicy) {
        self.records.push(record);
        self.enforce(policy);
    }

    /// Drops the oldest records of any action type over its cap, then the oldest overall.
    pub fn enforce(&mut self, policy: &HistoryPolicy) {
        let mut seen: AHashMap<HistoryAction, usize> = AHashMap::new();
        let mut keep = vec![true; self.records.len()];
        for (index, record) in self.records.iter().enumerate().rev() {
            let count = seen.entry(record.action.clone()).or_insert(0);
            *count += 1;
            if *count > policy.max_per_action {
                keep[index] = false;
            }
        }
        let mut flags = keep.into_iter();
        self.records.retain(|_| flags.next().unwrap_or(true));

        if self.records.len() > policy.max_total {
            let excess = self.records.len() - policy.max_total;
            self.records.drain(..excess);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The `n` most recent records, newest first.
    pub fn latest(&self, n: usize) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter().rev().take(n)
    }

    pub fn by_action<'a>(
        &'a self,
        action: &'a HistoryAction,
    ) -> impl Iterator<Item = &'a HistoryRecord> + 'a {
        self.records.iter().filter(move |r| &r.action == action)
    }

    /// Encodes the log as a compact binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, HistoryError> {
        encode_to_vec(self, standard()).map_err(|e| HistoryError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HistoryError> {
        decode_from_slice(bytes, standard())
            .map(|(log, _)| log)
            .map_err(|e| HistoryError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(action: HistoryAction, n: usize) -> HistoryRecord {
        HistoryRecord::new("api-1", action, format!("change {}", n))
    }

    #[test]
    fn per_action_cap_drops_oldest_of_that_action() {
        let policy = HistoryPolicy::new(100, 2);
        let mut log = HistoryLog::new("api-1");
        log.push(record(HistoryAction::Create, 0), &policy);
        for n in 1..=3 {
            log.push(record(HistoryAction::Update, n), &policy);
        }

        let summaries: Vec<_> = log.records.iter().map(|r| r.summary.as_str()).collect();
        assert_eq!(summaries, ["change 0", "change 2", "change 3"]);
    }

    #[test]
    fn total_cap_drops_oldest_overall() {
        let policy = HistoryPolicy::new(3, 20);
        let mut log = HistoryLog::new("api-1");
        for n in 0..5 {
            let action = if n % 2 == 0 {
                HistoryAction::Update
            } else {
                HistoryAction::Reorder
            };
            log.push(record(action, n), &policy);
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.records[0].summary, "change 2");
        assert_eq!(log.latest(1).next().map(|r| r.summary.as_str()), Some("change 4"));
    }
}
