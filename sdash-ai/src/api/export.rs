//! Export download endpoint

use crate::export::ExportFormat;
use crate::{ApiError, ApiResult, AppState};
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use tracing::info;

/// GET /api/export/:format
///
/// `format` is `csv`, `json` or `report`. The current analysis is returned as
/// an attachment named `sentiment-analysis-<timestamp>.<ext>`.
pub async fn export_analysis(
    State(state): State<AppState>,
    Path(format): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let format = ExportFormat::parse(&format)?;
    let analysis = state
        .session
        .lock()
        .await
        .current()
        .cloned()
        .ok_or_else(|| ApiError::NotFound("No analysis to export".to_string()))?;

    let now = sdash_common::time::now();
    let body = format.render(&analysis, &now)?;
    let file_name = format.file_name(&now);
    info!("Exporting {} results as {}", analysis.results.len(), file_name);

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    ))
}

/// Build export routes
pub fn export_routes() -> Router<AppState> {
    Router::new().route("/api/export/:format", get(export_analysis))
}
