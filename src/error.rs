//! Error types for the visibility engine.
//!
//! Only the citation-check path produces errors; the scoring pipeline is
//! total over well-typed input. Every `EngineError` is caught at the
//! citation-checker boundary and degrades the affected platform to its
//! heuristic score.

use thiserror::Error;

/// Domain-specific errors for engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid or malformed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network request failed
    #[error("Network error: {0}")]
    Network(String),

    /// External citation provider returned a failure status
    #[error("Provider error ({source_name}): {message}")]
    Provider {
        source_name: &'static str,
        message: String,
    },

    /// Provider response did not match the expected schema
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a provider error
    pub fn provider(source_name: &'static str, msg: impl Into<String>) -> Self {
        Self::Provider {
            source_name,
            message: msg.into(),
        }
    }

    /// Create a malformed-response error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}

/// Result type alias using EngineError.
pub type Result<T> = std::result::Result<T, EngineError>;
