//! Redraft Error Types
//!
//! Centralized error handling for the dispatch/apply pipeline.

use thiserror::Error;

/// Central error type for Redraft
#[derive(Error, Debug)]
pub enum RedraftError {
    #[error("API key for {0} is not set. Set it with the set-key command.")]
    MissingApiKey(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("API request failed: {0}")]
    Transport(String),

    #[error("Unexpected API response format: {0}")]
    ResponseShape(String),

    #[error("Document changed while the request was in flight (revision {expected} -> {actual})")]
    StaleRegion { expected: u64, actual: u64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Redraft operations
pub type RedraftResult<T> = Result<T, RedraftError>;

impl RedraftError {
    /// Stable failure class recorded in the failure log.
    pub fn classification(&self) -> &'static str {
        match self {
            RedraftError::MissingApiKey(_) => "credential",
            RedraftError::UnknownProvider(_) => "provider",
            RedraftError::Transport(_) => "transport",
            RedraftError::ResponseShape(_) => "response-shape",
            RedraftError::StaleRegion { .. } => "stale-region",
            RedraftError::Config(_) => "config",
            _ => "unclassified",
        }
    }
}
