//! Session orchestration and the response assistant

pub mod chat;
pub mod session;

pub use session::{ingest_file, AnalysisSession, IngestedFile, PendingBatch, SessionError};
