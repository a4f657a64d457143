//! Analysis history endpoints

use crate::{ApiResult, AppState};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use sdash_common::{AnalysisHistory, SentimentAnalysis};

/// GET /api/history
///
/// Most recent first, at most `history_limit` entries.
pub async fn list_history(State(state): State<AppState>) -> Json<Vec<AnalysisHistory>> {
    let session = state.session.lock().await;
    Json(session.history().cloned().collect())
}

/// POST /api/history/:id/load
///
/// Makes the stored analysis current again; 404 for unknown ids.
pub async fn load_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SentimentAnalysis>> {
    let mut session = state.session.lock().await;
    let analysis = session.load_from_history(&id)?.clone();
    Ok(Json(analysis))
}

/// Build history routes
pub fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/api/history", get(list_history))
        .route("/api/history/:id/load", post(load_history))
}
