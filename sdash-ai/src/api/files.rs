//! File upload endpoints
//!
//! Uploads are sent as the raw request body with the original file name in
//! the `filename` query parameter; the extension picks the parser.

use super::analysis::run_batch;
use crate::services::{ingest_file, IngestedFile};
use crate::{ApiError, ApiResult, AppState};
use axum::{
    body::Bytes,
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use sdash_common::{SentimentAnalysis, SUPPORTED_EXTENSIONS};
use serde::{Deserialize, Serialize};

/// Query parameters for uploads
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    pub filename: Option<String>,
    pub save_to_history: Option<bool>,
}

/// Response for POST /api/analyze/file
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysisResponse {
    #[serde(flatten)]
    pub analysis: SentimentAnalysis,
    pub file_name: String,
    pub total_found: usize,
    pub warning: Option<String>,
}

/// Response for GET /api/formats
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatsResponse {
    pub supported_extensions: Vec<String>,
    pub max_file_size_bytes: u64,
    pub max_fragments_per_file: usize,
}

fn require_filename(query: &UploadQuery) -> ApiResult<String> {
    match query.filename.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(ApiError::BadRequest(
            "Missing 'filename' query parameter".to_string(),
        )),
    }
}

/// Run extraction on the blocking pool, outside the session lock
async fn ingest(state: &AppState, file_name: String, body: Bytes) -> ApiResult<IngestedFile> {
    let extractor = state.extractor;
    let max_fragments = state.config.limits.max_fragments;
    let ingested = tokio::task::spawn_blocking(move || {
        ingest_file(&extractor, max_fragments, &file_name, &body)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Extraction task failed: {}", e)))??;
    Ok(ingested)
}

/// POST /api/extract?filename=reviews.csv
///
/// **Response:** `{"fragments": [...], "totalFound": 150, "warning": "..."}`
///
/// **Errors:**
/// - 413 file larger than the configured limit
/// - 415 unsupported extension
/// - 422 no usable text, or a corrupt file
pub async fn extract_file(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> ApiResult<Json<IngestedFile>> {
    let file_name = require_filename(&query)?;
    Ok(Json(ingest(&state, file_name, body).await?))
}

/// POST /api/analyze/file?filename=reviews.csv
///
/// Extracts, caps and classifies in one call.
pub async fn analyze_file(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> ApiResult<Json<FileAnalysisResponse>> {
    let file_name = require_filename(&query)?;
    let ingested = ingest(&state, file_name.clone(), body).await?;
    let analysis = run_batch(
        &state,
        ingested.fragments,
        query.save_to_history.unwrap_or(true),
    )
    .await?;

    Ok(Json(FileAnalysisResponse {
        analysis,
        file_name,
        total_found: ingested.total_found,
        warning: ingested.warning,
    }))
}

/// GET /api/formats
pub async fn supported_formats(State(state): State<AppState>) -> Json<FormatsResponse> {
    Json(FormatsResponse {
        supported_extensions: SUPPORTED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        max_file_size_bytes: state.extractor.max_file_size(),
        max_fragments_per_file: state.config.limits.max_fragments,
    })
}

/// Build file upload routes
pub fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/api/extract", post(extract_file))
        .route("/api/analyze/file", post(analyze_file))
        .route("/api/formats", get(supported_formats))
}
