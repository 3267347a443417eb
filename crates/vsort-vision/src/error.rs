//! Vision client error types.

use thiserror::Error;

/// Result type for vision operations.
pub type VisionResult<T> = Result<T, VisionError>;

/// Errors that can occur while calling the image-analysis service.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Failed to configure vision client: {0}")]
    ConfigError(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Analysis API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse analysis response: {0}")]
    Parse(String),

    #[error("Analysis timed out: {0}")]
    Timeout(String),
}

impl VisionError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// True for transport-level failures, including connect/read timeouts.
    pub fn is_transport(&self) -> bool {
        matches!(self, VisionError::Http(_) | VisionError::Timeout(_))
    }
}
