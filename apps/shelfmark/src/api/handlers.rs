//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Handlers take one snapshot of the store per request via the Query
//! Facade, so every view derived inside a request observes the same
//! record set. Mutation handlers write back to the data file after the
//! store call succeeds.

use super::{AppState, types};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{Local, NaiveDate};
use shelfmark_core::{
    Corpus, PaperDraft, PaperId, PaperPatch, ReadingStage, RecordStore, ShelfmarkError,
};

/// Evaluation instant for date-window filters: today, in local time.
///
/// The core never reads clocks; this is the single place the wall clock
/// enters the system.
fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn status_for(error: &ShelfmarkError) -> StatusCode {
    match error {
        ShelfmarkError::Validation { .. } => StatusCode::BAD_REQUEST,
        ShelfmarkError::NotFound(_) => StatusCode::NOT_FOUND,
        ShelfmarkError::Io(_) | ShelfmarkError::Serialization(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(types::HealthResponse::default())
}

// =============================================================================
// PAPER HANDLERS
// =============================================================================

/// `GET /api/research/` - list papers matching the filter parameters.
pub async fn list_papers_handler(
    State(state): State<AppState>,
    Query(params): Query<types::ListParams>,
) -> impl IntoResponse {
    let criteria = match params.to_criteria() {
        Ok(c) => c,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(types::PaperListResponse::error(e.to_string())),
            );
        }
    };

    let store = state.store.read().await;
    let papers = Corpus::snapshot(&*store).list(&criteria, today());
    (StatusCode::OK, Json(types::PaperListResponse::success(papers)))
}

/// `POST /api/research/add` - create a paper.
pub async fn add_paper_handler(
    State(state): State<AppState>,
    Json(draft): Json<PaperDraft>,
) -> impl IntoResponse {
    let mut store = state.store.write().await;
    match store.create(draft) {
        Ok(record) => {
            state.persist(&store);
            (StatusCode::OK, Json(types::PaperResponse::success(record)))
        }
        Err(e) => (
            status_for(&e),
            Json(types::PaperResponse::error(e.to_string())),
        ),
    }
}

/// `GET /api/research/{id}` - fetch one paper.
pub async fn get_paper_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let store = state.store.read().await;
    match store.get(PaperId(id)) {
        Some(record) => (StatusCode::OK, Json(types::PaperResponse::success(record))),
        None => (
            StatusCode::NOT_FOUND,
            Json(types::PaperResponse::error(
                ShelfmarkError::NotFound(PaperId(id)).to_string(),
            )),
        ),
    }
}

/// `PUT /api/research/{id}` - patch one paper.
pub async fn update_paper_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<PaperPatch>,
) -> impl IntoResponse {
    let mut store = state.store.write().await;
    match store.update(PaperId(id), patch) {
        Ok(record) => {
            state.persist(&store);
            (StatusCode::OK, Json(types::PaperResponse::success(record)))
        }
        Err(e) => (
            status_for(&e),
            Json(types::PaperResponse::error(e.to_string())),
        ),
    }
}

/// `DELETE /api/research/{id}` - delete one paper.
pub async fn delete_paper_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let mut store = state.store.write().await;
    match store.delete(PaperId(id)) {
        Ok(record) => {
            state.persist(&store);
            (StatusCode::OK, Json(types::PaperResponse::success(record)))
        }
        Err(e) => (
            status_for(&e),
            Json(types::PaperResponse::error(e.to_string())),
        ),
    }
}

// =============================================================================
// ANALYTICS HANDLERS
// =============================================================================

/// `GET /api/analytics/` - full analytics over the whole corpus.
pub async fn analytics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.read().await;
    let analytics = Corpus::snapshot(&*store).analytics();
    (
        StatusCode::OK,
        Json(types::AnalyticsResponse::success(&analytics)),
    )
}

/// `GET /api/analytics/stage/{stage}` - papers at exactly one stage.
pub async fn papers_by_stage_handler(
    State(state): State<AppState>,
    Path(stage): Path<String>,
) -> impl IntoResponse {
    let Some(stage) = ReadingStage::from_name(&stage) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(types::PaperListResponse::error(
                ShelfmarkError::validation(
                    "reading_stage",
                    format!("unknown reading stage '{}'", stage),
                )
                .to_string(),
            )),
        );
    };

    let store = state.store.read().await;
    let papers = Corpus::snapshot(&*store).papers_in_stage(stage);
    (StatusCode::OK, Json(types::PaperListResponse::success(papers)))
}
