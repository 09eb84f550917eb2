//! HTTP application assembly
//!
//! Builds the single axum `Router` served by the binary: the memory API,
//! a root-level health probe, request tracing, and CORS.
//!
//! ## Endpoint Map
//!
//! | Prefix              | Module | Description                       |
//! |---------------------|--------|-----------------------------------|
//! | `/health`           | api    | Readiness probe with store counts |
//! | `/api/v1/memories/*`| memory | Store, search, delete, stats      |

use crate::memory::{memory_router, MemoryState};
use axum::{
    http::{header, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the complete memodex HTTP application
///
/// The process only serves after the snapshot load succeeded, so a
/// reachable `/health` already implies the store is ready.
pub fn build_app(state: MemoryState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(state.clone())
        .merge(memory_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(cors_origins))
}

// =============================================================================
// Health probe
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    version: String,
    total_memories: usize,
    total_tags: usize,
    timestamp: DateTime<Utc>,
}

async fn health_check(
    axum::extract::State(state): axum::extract::State<MemoryState>,
) -> impl IntoResponse {
    let stats = state.service.stats().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        total_memories: stats.total_memories,
        total_tags: stats.total_tags,
        timestamp: Utc::now(),
    })
}

// =============================================================================
// CORS
// =============================================================================

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let parsed: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(parsed)
    }
}
