//! Response assistant endpoints

use crate::services::chat;
use crate::{ApiError, ApiResult, AppState};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: String,
    pub suggestions: Vec<String>,
}

/// GET /api/chat/welcome
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: chat::WELCOME.to_string(),
        suggestions: chat::SUGGESTED_QUESTIONS.iter().map(|q| q.to_string()).collect(),
    })
}

/// POST /api/chat
///
/// Answers about the current analysis, or about an empty result set when
/// nothing has been analyzed yet.
pub async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message cannot be empty".to_string()));
    }

    let session = state.session.lock().await;
    let results = session.current().map(|a| a.results.as_slice()).unwrap_or_default();
    Ok(Json(ChatResponse {
        reply: chat::reply(&request.message, results),
    }))
}

/// Build chat routes
pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/api/chat/welcome", get(welcome))
        .route("/api/chat", post(send_message))
}
