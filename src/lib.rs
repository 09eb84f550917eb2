//! Memodex - content-addressed memory store
//!
//! Clients submit text snippets with optional tags and metadata; memodex
//! deduplicates them by content hash, keeps everything in memory behind a
//! tag index, and mirrors every mutation to an on-disk snapshot read back
//! at startup.
//!
//! ## Architecture
//!
//! ```text
//! HTTP API (axum)
//!     │
//!     ▼
//! MemoryService ──── one write lock around every mutation
//!     │
//!     ├── RecordStore   content hash → Record (the only record owner)
//!     ├── TagIndex      tag → set of content hashes
//!     └── SnapshotFile  atomic snapshot.json, written after each mutation
//! ```
//!
//! ## Modules
//!
//! - [`api`]: HTTP router assembly, health probe, CORS
//! - [`config`]: Configuration management
//! - [`error`]: Crate-wide error type
//! - [`hash`]: Content hashing
//! - [`memory`]: Store, tag index, persistence, and the memory service

pub mod api;
pub mod config;
pub mod error;
pub mod hash;
pub mod memory;

pub use config::MemodexConfig;
pub use error::{Error, Result};
