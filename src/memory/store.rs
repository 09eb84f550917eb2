//! Record store keyed by content hash
//!
//! The store is the only owner of `Record` values. Identical content hashes
//! to the same key, so a second put of the same text replaces the first
//! record entirely (tags, metadata, type, and timestamp all reflect the
//! latest write). Locking lives in `MemoryService`, which guards the
//! store-then-index-then-persist sequence as one unit.

use crate::error::{Error, Result};
use crate::hash::ContentHash;
use crate::memory::types::Record;
use chrono::Utc;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

/// Map from content hash to record
#[derive(Debug, Default)]
pub struct RecordStore {
    records: HashMap<ContentHash, Record>,
}

impl RecordStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Rebuild a store from a persisted record map
    pub(crate) fn from_records(records: HashMap<ContentHash, Record>) -> Self {
        Self { records }
    }

    /// Insert or replace the record for the given content.
    ///
    /// Returns the content hash and the record it replaced, if any, so the
    /// caller can unlink the previous tag set and roll back on a failed
    /// save. Empty or whitespace-only content is rejected.
    pub fn put(
        &mut self,
        content: String,
        metadata: HashMap<String, Value>,
        tags: BTreeSet<String>,
        kind: String,
    ) -> Result<(ContentHash, Option<Record>)> {
        if content.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "content must not be empty".to_string(),
            ));
        }

        let hash = ContentHash::of(&content);
        let record = Record {
            content,
            metadata,
            tags,
            kind,
            timestamp: Utc::now(),
            content_hash: hash.clone(),
        };
        let previous = self.records.insert(hash.clone(), record);
        Ok((hash, previous))
    }

    /// Retrieve a record by content hash
    pub fn get(&self, hash: &ContentHash) -> Option<&Record> {
        self.records.get(hash)
    }

    /// Remove a record, returning it so the caller can unlink its tags
    pub fn delete(&mut self, hash: &ContentHash) -> Option<Record> {
        self.records.remove(hash)
    }

    /// Re-insert a record verbatim, keeping its original timestamp.
    /// Used when rolling back a mutation whose save failed.
    pub(crate) fn restore(&mut self, record: Record) {
        self.records.insert(record.content_hash.clone(), record);
    }

    /// Snapshot of all current records; iteration order is arbitrary
    pub fn all(&self) -> Vec<Record> {
        self.records.values().cloned().collect()
    }

    /// Iterate over records without cloning
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn records(&self) -> &HashMap<ContentHash, Record> {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put_simple(store: &mut RecordStore, content: &str, tags: &[&str]) -> ContentHash {
        let tags = tags.iter().map(|t| t.to_string()).collect();
        let (hash, _) = store
            .put(
                content.to_string(),
                HashMap::new(),
                tags,
                "general".to_string(),
            )
            .unwrap();
        hash
    }

    #[test]
    fn test_put_and_get() {
        let mut store = RecordStore::new();
        let hash = put_simple(&mut store, "hello world", &["greeting"]);

        let record = store.get(&hash).unwrap();
        assert_eq!(record.content, "hello world");
        assert_eq!(record.content_hash, hash);
        assert!(record.tags.contains("greeting"));
    }

    #[test]
    fn test_put_rejects_empty_content() {
        let mut store = RecordStore::new();
        let result = store.put(
            "   ".to_string(),
            HashMap::new(),
            BTreeSet::new(),
            "general".to_string(),
        );
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_identical_content_dedupes() {
        let mut store = RecordStore::new();
        let first = put_simple(&mut store, "same text", &["old"]);

        let (second, previous) = store
            .put(
                "same text".to_string(),
                HashMap::new(),
                BTreeSet::from(["new".to_string()]),
                "code".to_string(),
            )
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(store.len(), 1);

        // The replaced record is handed back for tag unlinking
        let previous = previous.unwrap();
        assert!(previous.tags.contains("old"));

        // Last write wins
        let current = store.get(&second).unwrap();
        assert!(current.tags.contains("new"));
        assert_eq!(current.kind, "code");
        assert!(current.timestamp >= previous.timestamp);
    }

    #[test]
    fn test_delete_returns_record() {
        let mut store = RecordStore::new();
        let hash = put_simple(&mut store, "to delete", &["x"]);

        let removed = store.delete(&hash).unwrap();
        assert_eq!(removed.content, "to delete");
        assert!(store.get(&hash).is_none());
        assert!(store.delete(&hash).is_none());
    }

    #[test]
    fn test_restore_keeps_timestamp() {
        let mut store = RecordStore::new();
        let hash = put_simple(&mut store, "rollback me", &[]);
        let original = store.delete(&hash).unwrap();
        let timestamp = original.timestamp;

        store.restore(original);
        assert_eq!(store.get(&hash).unwrap().timestamp, timestamp);
    }

    #[test]
    fn test_all_snapshots_every_record() {
        let mut store = RecordStore::new();
        put_simple(&mut store, "one", &[]);
        put_simple(&mut store, "two", &[]);
        put_simple(&mut store, "three", &[]);

        let all = store.all();
        assert_eq!(all.len(), 3);
        assert_eq!(store.len(), 3);
    }
}
