//! Snapshot persistence for the memory store
//!
//! The record map and the tag index are written together as one JSON
//! document, so a reload can never observe one of them pre-mutation and the
//! other post-mutation. Writes go to a temporary file in the same directory
//! which is renamed over the live snapshot; a crash mid-write leaves the
//! previous snapshot intact, and a partially written temp file is never
//! loaded.

use crate::error::{Error, Result};
use crate::hash::ContentHash;
use crate::memory::index::TagIndex;
use crate::memory::store::RecordStore;
use crate::memory::types::Record;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Snapshot file name inside the data directory
pub const SNAPSHOT_FILE: &str = "snapshot.json";

const SNAPSHOT_VERSION: u32 = 1;

/// On-disk form of the store and index
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    records: HashMap<ContentHash, Record>,
    tags: HashMap<String, BTreeSet<ContentHash>>,
}

/// Handle to the durable snapshot of the store and tag index
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Create a snapshot handle, creating the data directory if needed
    pub async fn new(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let data_dir = data_dir.as_ref();
        tokio::fs::create_dir_all(data_dir).await?;
        Ok(Self {
            path: data_dir.join(SNAPSHOT_FILE),
        })
    }

    /// Write both structures to disk as one atomic snapshot
    pub async fn save(&self, store: &RecordStore, index: &TagIndex) -> Result<()> {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            records: store.records().clone(),
            tags: index.entries().clone(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;

        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, json).await?;

        let temp_file = tokio::fs::File::open(&temp_path).await?;
        temp_file.sync_all().await?;

        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }

    /// Read the snapshot back into memory.
    ///
    /// A missing file yields empty structures; anything unreadable or
    /// malformed is a `CorruptState` error, which is fatal at startup.
    pub async fn load(&self) -> Result<(RecordStore, TagIndex)> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok((RecordStore::new(), TagIndex::new()));
            }
            Err(e) => {
                return Err(Error::CorruptState(format!(
                    "failed to read snapshot {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let snapshot: Snapshot = serde_json::from_str(&data).map_err(|e| {
            Error::CorruptState(format!(
                "malformed snapshot {}: {}",
                self.path.display(),
                e
            ))
        })?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(Error::CorruptState(format!(
                "unsupported snapshot version {} in {}",
                snapshot.version,
                self.path.display()
            )));
        }

        Ok((
            RecordStore::from_records(snapshot.records),
            TagIndex::from_entries(snapshot.tags),
        ))
    }
}
