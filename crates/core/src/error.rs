//! Error types for the circuitry workspace.
//!
//! This module defines a unified error enum covering all error categories
//! in the application: configuration, I/O, generative provider, embedding
//! provider, index state, and query input errors.

use thiserror::Error;

/// Unified error type for the circuitry workspace.
///
/// All fallible functions return `Result<T, AppError>`. Errors are
/// represented and propagated, never swallowed. The single exception is
/// the query-normalization soft fallback, which logs and degrades to the
/// raw query instead of failing the request.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generative model provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Embedding provider errors
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Index build, persistence, and load errors
    #[error("Index error: {0}")]
    Index(String),

    /// Invalid query input, rejected before any external call
    #[error("Query error: {0}")]
    Query(String),

    /// Prompt template rendering errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
