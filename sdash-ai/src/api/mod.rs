//! HTTP API handlers for sdash-ai
//!
//! Local single-user REST API behind the dashboard (loopback only).

pub mod analysis;
pub mod chat;
pub mod export;
pub mod files;
pub mod health;
pub mod history;

pub use analysis::analysis_routes;
pub use chat::chat_routes;
pub use export::export_routes;
pub use files::file_routes;
pub use health::health_routes;
pub use history::history_routes;
