//! HTTP handlers for the memory API
//!
//! Provides 5 REST endpoints over the memory service:
//! - POST   /api/v1/memories         — store a memory
//! - GET    /api/v1/memories         — list all memories
//! - POST   /api/v1/memories/search  — tag-intersection search
//! - GET    /api/v1/memories/stats   — store statistics
//! - DELETE /api/v1/memories/:hash   — delete by content hash

use crate::error::Error;
use crate::hash::ContentHash;
use crate::memory::service::MemoryService;
use crate::memory::types::{ApiError, SearchByTagsRequest, StoreMemoryRequest};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;

/// Shared state for memory handlers
#[derive(Clone)]
pub struct MemoryState {
    pub service: Arc<MemoryService>,
}

/// Create the memory router with all REST endpoints
pub fn memory_router(state: MemoryState) -> Router {
    Router::new()
        .route("/api/v1/memories", post(store_memory))
        .route("/api/v1/memories", get(list_memories))
        .route("/api/v1/memories/search", post(search_by_tags))
        .route("/api/v1/memories/stats", get(get_stats))
        .route("/api/v1/memories/:hash", delete(delete_memory))
        .with_state(state)
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/v1/memories
async fn store_memory(
    State(state): State<MemoryState>,
    Json(request): Json<StoreMemoryRequest>,
) -> Response {
    match state.service.store(request).await {
        Ok(hash) => (
            StatusCode::CREATED,
            Json(serde_json::json!({"id": hash})),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/v1/memories
async fn list_memories(State(state): State<MemoryState>) -> Response {
    Json(state.service.search_all().await).into_response()
}

/// POST /api/v1/memories/search
async fn search_by_tags(
    State(state): State<MemoryState>,
    Json(request): Json<SearchByTagsRequest>,
) -> Response {
    Json(state.service.search_by_tags(&request.tags).await).into_response()
}

/// GET /api/v1/memories/stats
async fn get_stats(State(state): State<MemoryState>) -> Response {
    Json(state.service.stats().await).into_response()
}

/// DELETE /api/v1/memories/:hash
async fn delete_memory(
    State(state): State<MemoryState>,
    Path(hash): Path<String>,
) -> Response {
    match state.service.delete(&ContentHash::from_string(hash)).await {
        Ok(()) => Json(serde_json::json!({"status": "deleted"})).into_response(),
        Err(e) => error_response(e),
    }
}

/// Map a core error to its wire status and envelope
fn error_response(error: Error) -> Response {
    let (status, body) = match &error {
        Error::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, ApiError::bad_request(msg)),
        Error::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::not_found(msg)),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::internal(error.to_string()),
        ),
    };
    (status, Json(body)).into_response()
}
