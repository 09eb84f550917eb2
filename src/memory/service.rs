//! Memory service orchestrating store, tag index, and persistence
//!
//! Every mutation runs store update, index update, and snapshot save under
//! one write lock, so readers never observe a half-applied mutation and the
//! durable copy never lags memory by more than the in-flight request. When
//! the save fails, the in-memory mutation is rolled back before the error
//! is reported, keeping memory and disk in agreement after every response.

use crate::error::{Error, Result};
use crate::hash::ContentHash;
use crate::memory::index::TagIndex;
use crate::memory::persist::SnapshotFile;
use crate::memory::store::RecordStore;
use crate::memory::types::{MemoryStats, Record, StoreMemoryRequest};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tokio::sync::RwLock;

/// The store and its tag index, mutated only together
struct MemoryState {
    store: RecordStore,
    index: TagIndex,
}

/// Orchestrates the five memory operations over the in-memory state and
/// its durable snapshot
pub struct MemoryService {
    state: RwLock<MemoryState>,
    snapshot: SnapshotFile,
}

impl MemoryService {
    /// Load the persisted snapshot and construct the service.
    ///
    /// Fails with `CorruptState` when the snapshot exists but cannot be
    /// read; no operation may be served in that case.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let snapshot = SnapshotFile::new(data_dir).await?;
        let (store, index) = snapshot.load().await?;
        tracing::info!(
            records = store.len(),
            tags = index.len(),
            "loaded memory snapshot"
        );
        Ok(Self {
            state: RwLock::new(MemoryState { store, index }),
            snapshot,
        })
    }

    /// Store a memory, deduplicating by content hash.
    ///
    /// Storing identical content again replaces the earlier record's tags,
    /// metadata, and type, and relinks the tag index accordingly.
    pub async fn store(&self, request: StoreMemoryRequest) -> Result<ContentHash> {
        let tags: BTreeSet<String> = request.tags.into_iter().collect();
        let mut state = self.state.write().await;

        let (hash, previous) = state.store.put(
            request.content,
            request.metadata,
            tags.clone(),
            request.kind,
        )?;

        if let Some(old) = &previous {
            for tag in &old.tags {
                state.index.remove(tag, &hash);
            }
        }
        for tag in &tags {
            state.index.add(tag, &hash);
        }

        if let Err(e) = self.snapshot.save(&state.store, &state.index).await {
            for tag in &tags {
                state.index.remove(tag, &hash);
            }
            match previous {
                Some(old) => {
                    for tag in &old.tags {
                        state.index.add(tag, &hash);
                    }
                    state.store.restore(old);
                }
                None => {
                    state.store.delete(&hash);
                }
            }
            return Err(Error::Persistence(e.to_string()));
        }

        tracing::info!(hash = %hash, replaced = previous.is_some(), "stored memory");
        Ok(hash)
    }

    /// All records, unfiltered and unranked
    pub async fn search_all(&self) -> Vec<Record> {
        self.state.read().await.store.all()
    }

    /// Records carrying every one of the given tags; empty input yields
    /// an empty result
    pub async fn search_by_tags(&self, tags: &[String]) -> Vec<Record> {
        let state = self.state.read().await;
        let mut results = Vec::new();
        for hash in state.index.intersect(tags) {
            match state.store.get(&hash) {
                Some(record) => results.push(record.clone()),
                // The index is kept consistent with the store, so a miss
                // here is a bug; skip the hash rather than fail the search.
                None => tracing::warn!(hash = %hash, "tag index references a missing record"),
            }
        }
        results
    }

    /// Delete a record and unlink all of its tags
    pub async fn delete(&self, hash: &ContentHash) -> Result<()> {
        let mut state = self.state.write().await;

        let record = state
            .store
            .delete(hash)
            .ok_or_else(|| Error::NotFound(format!("no memory with hash {}", hash)))?;

        for tag in &record.tags {
            state.index.remove(tag, hash);
        }

        if let Err(e) = self.snapshot.save(&state.store, &state.index).await {
            for tag in &record.tags {
                state.index.add(tag, hash);
            }
            state.store.restore(record);
            return Err(Error::Persistence(e.to_string()));
        }

        tracing::info!(hash = %hash, "deleted memory");
        Ok(())
    }

    /// Aggregate statistics over the store and index; no mutation
    pub async fn stats(&self) -> MemoryStats {
        let state = self.state.read().await;

        let mut memory_types = BTreeMap::new();
        let mut last_added = None;
        for record in state.store.iter() {
            *memory_types.entry(record.kind.clone()).or_insert(0) += 1;
            if last_added.map_or(true, |ts| record.timestamp > ts) {
                last_added = Some(record.timestamp);
            }
        }

        MemoryStats {
            total_memories: state.store.len(),
            total_tags: state.index.len(),
            tags_distribution: state.index.distribution(),
            memory_types,
            last_added,
        }
    }
}
