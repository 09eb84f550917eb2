//! Memory module — content-addressed storage with tag search
//!
//! `RecordStore` owns the records, `TagIndex` holds tag back-references
//! into it, `SnapshotFile` mirrors both to disk after every mutation, and
//! `MemoryService` ties the three together behind the five operations the
//! HTTP layer exposes.

pub mod handler;
pub mod index;
pub mod persist;
pub mod service;
pub mod store;
pub mod types;

pub use handler::{memory_router, MemoryState};
pub use index::TagIndex;
pub use persist::SnapshotFile;
pub use service::MemoryService;
pub use store::RecordStore;
pub use types::{MemoryStats, Record, StoreMemoryRequest};
