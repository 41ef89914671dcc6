use thiserror::Error;

use crate::domain::models::ValidationError;

/// Override store operation errors.
///
/// Pure computation components never raise these; only the store and the
/// collaborator interfaces perform I/O. A missing override is not an error —
/// lookups return `Option` instead.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Query failed: {0}")]
    QueryFailed(#[from] sqlx::Error),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown prompt type: {0}")]
    UnknownPromptType(String),
}

/// Metrics source errors.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Metrics source unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed metrics payload: {0}")]
    Malformed(String),
}

/// Research source errors.
#[derive(Debug, Error)]
pub enum ResearchError {
    #[error("Research source unavailable: {0}")]
    Unavailable(String),
}

/// To-do sink errors.
///
/// The scheduler catches these and degrades instead of propagating; direct
/// callers of a sink see them as-is.
#[derive(Debug, Error)]
#[error("Todo sink rejected append: {0}")]
pub struct TodoSinkError(pub String);
