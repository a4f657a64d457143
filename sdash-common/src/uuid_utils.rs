//! UUID utilities

use uuid::Uuid;

/// Generate a new UUIDv4
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Identifier for a single classified text
pub fn result_id() -> String {
    format!("analysis-{}", generate())
}

/// Identifier for a history snapshot
pub fn history_id() -> String {
    format!("history-{}", generate())
}
