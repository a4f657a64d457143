//! sdash-ai library interface
//!
//! Sentiment classification, file-to-text extraction and the local HTTP API
//! that serves the dashboard. Exposed as a library for integration testing.

pub mod api;
pub mod classifier;
pub mod error;
pub mod export;
pub mod extractor;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use classifier::{JitterPolicy, Lexicon, LexiconClassifier};
use extractor::FileExtractor;
use sdash_common::config::TomlConfig;
use services::AnalysisSession;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Headroom above the upload limit so oversize files reach the extractor's size check
const BODY_LIMIT_HEADROOM: usize = 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// The single dashboard session
    pub session: Arc<Mutex<AnalysisSession>>,
    pub classifier: LexiconClassifier,
    pub extractor: FileExtractor,
    pub config: Arc<TomlConfig>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: TomlConfig) -> Self {
        let classifier = LexiconClassifier::new(
            Arc::new(Lexicon::default()),
            JitterPolicy::from_config(&config.classifier),
        );
        Self {
            session: Arc::new(Mutex::new(AnalysisSession::new(&config.limits))),
            classifier,
            extractor: FileExtractor::new(config.limits.max_file_size_bytes),
            config: Arc::new(config),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.extractor.max_file_size())
        .unwrap_or(usize::MAX)
        .saturating_add(BODY_LIMIT_HEADROOM);

    Router::new()
        .merge(api::health_routes())
        .merge(api::analysis_routes())
        .merge(api::file_routes())
        .merge(api::history_routes())
        .merge(api::export_routes())
        .merge(api::chat_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
