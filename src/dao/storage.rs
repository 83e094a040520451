use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by key-value store backends regardless of where values live.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend cannot be reached or opened at all.
    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A single key could not be written or removed.
    #[error("failed to write key `{key}`")]
    Write {
        key: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a write error for `key` from any backend failure.
    pub fn write(key: &str, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Write {
            key: key.to_string(),
            source: Box::new(source),
        }
    }
}
