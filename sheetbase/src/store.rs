//! Record Store - 本地记录缓存
//!
//! The client's view of which records exist. Every mutation here mirrors a
//! remote call that has already succeeded; nothing is applied speculatively,
//! so a failed call never leaves this store disagreeing with the sheet.

use shared::Record;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("record '{0}' is not in the store")]
    UnknownRecord(String),

    #[error("record '{0}' is already in the store")]
    DuplicateId(String),

    #[error("record has no id")]
    MissingId,

    #[error("record id '{found}' does not match '{expected}'")]
    IdMismatch { expected: String, found: String },
}

/// Ordered in-memory mirror of the remote rows
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with a fresh list, keeping its order.
    ///
    /// Rows without an id and repeated ids (after the first) are skipped.
    pub fn replace_all(&mut self, records: Vec<Record>) {
        let mut seen = HashSet::with_capacity(records.len());
        self.records = records
            .into_iter()
            .filter(|r| !r.id.is_empty() && seen.insert(r.id.clone()))
            .collect();
        tracing::debug!(count = self.records.len(), "store replaced");
    }

    /// Append a record the endpoint has just created
    pub fn apply_create(&mut self, record: Record) -> Result<(), StoreError> {
        if record.id.is_empty() {
            return Err(StoreError::MissingId);
        }
        if self.position(&record.id).is_some() {
            tracing::error!(id = %record.id, "create confirmed for an id already in the store");
            return Err(StoreError::DuplicateId(record.id));
        }
        self.records.push(record);
        Ok(())
    }

    /// Replace the entry for `id` in place
    pub fn apply_update(&mut self, id: &str, record: Record) -> Result<(), StoreError> {
        if record.id != id {
            return Err(StoreError::IdMismatch {
                expected: id.to_string(),
                found: record.id,
            });
        }
        match self.position(id) {
            Some(index) => {
                self.records[index] = record;
                Ok(())
            }
            None => {
                // list/create discipline should make this unreachable
                tracing::error!(id, "update confirmed for a record the store never saw");
                Err(StoreError::UnknownRecord(id.to_string()))
            }
        }
    }

    /// Remove the entry for `id`; returns whether anything was removed
    pub fn apply_delete(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{RecordDraft, RecordStatus};

    fn record(id: &str, name: &str) -> Record {
        RecordDraft::new(name, "Eng", "R&D", format!("{name}@x.com"), RecordStatus::Active)
            .into_record(id)
    }

    fn store_of(ids: &[&str]) -> RecordStore {
        let mut store = RecordStore::new();
        store.replace_all(ids.iter().map(|id| record(id, &format!("n{id}"))).collect());
        store
    }

    fn ids(store: &RecordStore) -> Vec<&str> {
        store.records().iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_replace_all_keeps_order() {
        let store = store_of(&["3", "1", "2"]);
        assert_eq!(ids(&store), ["3", "1", "2"]);
    }

    #[test]
    fn test_replace_all_is_last_wins() {
        let mut store = store_of(&["1", "2"]);
        store.replace_all(vec![record("9", "z")]);
        assert_eq!(ids(&store), ["9"]);
    }

    #[test]
    fn test_replace_all_skips_blank_and_repeated_ids() {
        let mut store = RecordStore::new();
        store.replace_all(vec![record("1", "a"), record("", "b"), record("1", "c")]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("1").unwrap().name, "a");
    }

    #[test]
    fn test_apply_create_appends() {
        let mut store = store_of(&["1"]);
        store.apply_create(record("2", "b")).unwrap();
        assert_eq!(ids(&store), ["1", "2"]);
    }

    #[test]
    fn test_apply_create_rejects_duplicate_and_missing_id() {
        let mut store = store_of(&["1"]);
        assert_eq!(
            store.apply_create(record("1", "again")),
            Err(StoreError::DuplicateId("1".into()))
        );
        assert_eq!(store.apply_create(record("", "x")), Err(StoreError::MissingId));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_apply_update_replaces_only_target() {
        let mut store = store_of(&["1", "2", "3"]);
        let before_1 = store.get("1").cloned();
        let before_3 = store.get("3").cloned();

        let updated = record("2", "renamed");
        store.apply_update("2", updated.clone()).unwrap();

        assert_eq!(store.get("2"), Some(&updated));
        assert_eq!(store.get("1").cloned(), before_1);
        assert_eq!(store.get("3").cloned(), before_3);
        assert_eq!(ids(&store), ["1", "2", "3"]);
    }

    #[test]
    fn test_apply_update_unknown_id() {
        let mut store = store_of(&["1"]);
        assert_eq!(
            store.apply_update("7", record("7", "x")),
            Err(StoreError::UnknownRecord("7".into()))
        );
    }

    #[test]
    fn test_apply_update_id_mismatch() {
        let mut store = store_of(&["1", "2"]);
        let err = store.apply_update("1", record("2", "x")).unwrap_err();
        assert!(matches!(err, StoreError::IdMismatch { .. }));
        assert_eq!(store.get("1").unwrap().name, "n1");
    }

    #[test]
    fn test_apply_delete_is_idempotent() {
        let mut once = store_of(&["1", "2", "3"]);
        assert!(once.apply_delete("2"));

        let mut twice = store_of(&["1", "2", "3"]);
        assert!(twice.apply_delete("2"));
        assert!(!twice.apply_delete("2"));

        assert_eq!(once.records(), twice.records());
        assert_eq!(ids(&twice), ["1", "3"]);
    }
}
