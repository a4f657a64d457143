//! # sdash Common Library
//!
//! Shared code for the sentiment dashboard services including:
//! - Analysis data model (results, summary, history snapshots)
//! - Configuration loading
//! - Common error type
//! - Timestamp and identifier helpers

pub mod config;
pub mod error;
pub mod models;
pub mod time;
pub mod uuid_utils;

pub use error::{Error, Result};
pub use models::{
    AnalysisHistory, AnalysisSummary, Sentiment, SentimentAnalysis, SentimentDistribution,
    SentimentResult, SentimentScores,
};

/// Largest upload accepted by the extractor (10 MiB)
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Fragments kept from a single file before the rest are dropped
pub const MAX_FRAGMENTS_PER_FILE: usize = 100;

/// Number of past analyses kept in the session history
pub const HISTORY_LIMIT: usize = 10;

/// File extensions the extractor understands
pub const SUPPORTED_EXTENSIONS: [&str; 7] = [".txt", ".csv", ".json", ".pdf", ".docx", ".xlsx", ".xls"];
