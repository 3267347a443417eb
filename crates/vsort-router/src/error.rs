//! Router error types.

use thiserror::Error;
use vsort_storage::StorageError;
use vsort_vision::VisionError;

pub type RouterResult<T> = Result<T, RouterError>;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("Read failed: {0}")]
    Read(String),

    #[error("Classification failed: {0}")]
    Classification(#[from] VisionError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl RouterError {
    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
