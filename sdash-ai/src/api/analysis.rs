//! Text analysis endpoints

use crate::classifier::LexiconClassifier;
use crate::services::AnalysisSession;
use crate::{ApiError, ApiResult, AppState};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use sdash_common::SentimentAnalysis;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Request body for POST /api/analyze
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub texts: Vec<String>,
    #[serde(default = "default_save_to_history")]
    pub save_to_history: bool,
}

fn default_save_to_history() -> bool {
    true
}

/// Classify a batch without holding the session lock
///
/// The session is claimed first, so a concurrent batch gets 409 instead of
/// queueing behind this one. The claim, classification and release run on a
/// spawned task: a dropped request cannot leave the session claimed.
pub(crate) async fn run_batch(
    state: &AppState,
    texts: Vec<String>,
    save_to_history: bool,
) -> ApiResult<SentimentAnalysis> {
    let batch = tokio::spawn(classify_claimed(
        state.session.clone(),
        state.classifier.clone(),
        texts,
        save_to_history,
    ));
    batch
        .await
        .map_err(|e| ApiError::Internal(format!("Analysis task failed: {}", e)))?
}

async fn classify_claimed(
    session: Arc<Mutex<AnalysisSession>>,
    classifier: LexiconClassifier,
    texts: Vec<String>,
    save_to_history: bool,
) -> ApiResult<SentimentAnalysis> {
    let batch = session.lock().await.begin_batch(texts, save_to_history)?;

    let texts = batch.texts().to_vec();
    let classified = tokio::task::spawn_blocking(move || classifier.classify_batch(&texts)).await;

    let mut session = session.lock().await;
    match classified {
        Ok(results) => Ok(session.complete_batch(batch, results)),
        Err(e) => {
            session.abort_batch(batch);
            Err(ApiError::Internal(format!("Classification task failed: {}", e)))
        }
    }
}

/// POST /api/analyze
///
/// **Request:** `{"texts": ["..."], "saveToHistory": true}`
/// **Response:** the new analysis (`results` + `summary`)
///
/// **Errors:**
/// - 400 Bad Request: no non-blank texts
/// - 409 Conflict: another batch is in flight
pub async fn analyze_texts(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<SentimentAnalysis>> {
    info!("Analysis requested for {} texts", request.texts.len());
    let analysis = run_batch(&state, request.texts, request.save_to_history).await?;
    Ok(Json(analysis))
}

/// GET /api/analysis
pub async fn current_analysis(State(state): State<AppState>) -> ApiResult<Json<SentimentAnalysis>> {
    let session = state.session.lock().await;
    session
        .current()
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No analysis has been run yet".to_string()))
}

/// DELETE /api/analysis
pub async fn clear_analysis(State(state): State<AppState>) -> StatusCode {
    state.session.lock().await.clear();
    info!("Current analysis cleared");
    StatusCode::NO_CONTENT
}

/// Build analysis routes
pub fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/api/analyze", post(analyze_texts))
        .route("/api/analysis", get(current_analysis).delete(clear_analysis))
}
