//! Wire and storage types for the memory module
//!
//! A `Record` is both the persisted form and the API representation of a
//! stored memory. All types use camelCase JSON serialization.

use crate::hash::ContentHash;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A stored memory, keyed by the hash of its content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// The memory text; never empty
    pub content: String,
    /// Open key/value map supplied by the client
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    /// Tag set; duplicates collapse
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Free-form category, defaults to "general"
    #[serde(rename = "type")]
    pub kind: String,
    /// Time of the most recent write of this content, assigned by the store
    pub timestamp: DateTime<Utc>,
    /// SHA-256 hex digest of `content`; the record's identity
    pub content_hash: ContentHash,
}

/// Request body for storing a memory
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreMemoryRequest {
    pub content: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    "general".to_string()
}

/// Request body for tag-intersection search
#[derive(Debug, Deserialize)]
pub struct SearchByTagsRequest {
    pub tags: Vec<String>,
}

/// Aggregated store statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    pub total_memories: usize,
    pub total_tags: usize,
    /// Tag → number of records carrying it
    pub tags_distribution: BTreeMap<String, usize>,
    /// Type → number of records of that type
    pub memory_types: BTreeMap<String, usize>,
    /// Timestamp of the most recently written record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_added: Option<DateTime<Utc>>,
}

/// Wire error envelope: `{"error": {"code": ..., "message": ...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

/// Error detail inside the envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_code("BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_code("NOT_FOUND", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_code("INTERNAL", message)
    }

    fn with_code(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_request_defaults() {
        let req: StoreMemoryRequest =
            serde_json::from_str(r#"{"content": "remember this"}"#).unwrap();
        assert_eq!(req.content, "remember this");
        assert!(req.metadata.is_empty());
        assert!(req.tags.is_empty());
        assert_eq!(req.kind, "general");
    }

    #[test]
    fn test_store_request_type_field() {
        let req: StoreMemoryRequest =
            serde_json::from_str(r#"{"content": "x", "type": "code", "tags": ["rust"]}"#)
                .unwrap();
        assert_eq!(req.kind, "code");
        assert_eq!(req.tags, vec!["rust"]);
    }

    #[test]
    fn test_record_round_trip() {
        let record = Record {
            content: "note".to_string(),
            metadata: HashMap::from([("source".to_string(), Value::from("cli"))]),
            tags: BTreeSet::from(["a".to_string(), "b".to_string()]),
            kind: "general".to_string(),
            timestamp: Utc::now(),
            content_hash: ContentHash::of("note"),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "general");
        assert_eq!(json["contentHash"], record.content_hash.as_str());

        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_api_error_shape() {
        let err = ApiError::not_found("no such memory");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "no such memory");
    }
}
