//! # Shelfmark HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `POST /api/research/add` - Add a paper
//! - `GET /api/research/` - List papers, with filter query parameters
//! - `GET /api/research/{id}` - Fetch a single paper
//! - `PUT /api/research/{id}` - Update a paper
//! - `DELETE /api/research/{id}` - Delete a paper
//! - `GET /api/analytics/` - Funnel, citation groups, cross-tab, summary
//! - `GET /api/analytics/stage/{stage}` - Papers at one stage
//! - `GET /health` - Health check
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `SHELFMARK_CORS_ORIGINS`: Comma-separated list of allowed origins,
//!   or "*" for all (default: localhost only)

mod handlers;
mod types;

// Re-export handlers and types for integration tests (via `shelfmark::api::*`)
#[allow(unused_imports)]
pub use handlers::{
    add_paper_handler, analytics_handler, delete_paper_handler, get_paper_handler, health_handler,
    list_papers_handler, papers_by_stage_handler, update_paper_handler,
};
#[allow(unused_imports)]
pub use types::{
    AnalyticsJson, AnalyticsResponse, HealthResponse, ListParams, PaperListResponse, PaperResponse,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use shelfmark_core::{MemoryStore, ShelfmarkError};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the record store.
#[derive(Clone)]
pub struct AppState {
    /// The in-memory record store.
    pub store: Arc<RwLock<MemoryStore>>,
    /// Data file rewritten after each mutation, if configured.
    data_path: Option<PathBuf>,
}

impl AppState {
    /// Create new app state around a store, without file persistence.
    #[must_use]
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            data_path: None,
        }
    }

    /// Create new app state that writes the corpus back to `path` after
    /// each mutation.
    #[must_use]
    pub fn with_data_path(store: MemoryStore, path: PathBuf) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            data_path: Some(path),
        }
    }

    /// Write the corpus back to the data file, if one is configured.
    ///
    /// The mutation has already been applied; a failed write keeps the
    /// in-memory state authoritative and is surfaced in the log.
    pub(crate) fn persist(&self, store: &MemoryStore) {
        if let Some(path) = &self.data_path {
            if let Err(e) = crate::persistence::save_store(path, store) {
                tracing::warn!("Failed to persist corpus to {}: {}", path.display(), e);
            }
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from environment configuration.
///
/// Reads `SHELFMARK_CORS_ORIGINS`:
/// - If "*": allows all origins (development mode - use with caution!)
/// - If not set: defaults to localhost only (restrictive default)
/// - Otherwise: parses comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("SHELFMARK_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (SHELFMARK_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in SHELFMARK_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                cors_with_origins(allowed_origins)
            }
        }
        None => {
            tracing::info!("CORS: No SHELFMARK_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins
/// (the frontend dev servers).
fn build_localhost_cors() -> CorsLayer {
    let localhost_origins = vec![
        "http://localhost:3000".parse::<HeaderValue>().ok(),
        "http://localhost:5173".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:3000".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:5173".parse::<HeaderValue>().ok(),
    ];
    cors_with_origins(localhost_origins.into_iter().flatten().collect())
}

fn cors_with_origins(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit - caps request payloads
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer();

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/research/add", post(handlers::add_paper_handler))
        .route("/api/research/", get(handlers::list_papers_handler))
        .route(
            "/api/research/{id}",
            get(handlers::get_paper_handler)
                .put(handlers::update_paper_handler)
                .delete(handlers::delete_paper_handler),
        )
        .route("/api/analytics/", get(handlers::analytics_handler))
        .route(
            "/api/analytics/stage/{stage}",
            get(handlers::papers_by_stage_handler),
        )
        .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), ShelfmarkError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ShelfmarkError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Shelfmark HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| ShelfmarkError::Io(format!("Server error: {}", e)))
}
