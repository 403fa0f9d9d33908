/// Error types for the application
///
/// Errors fall in two groups: the ones the user must acknowledge
/// (shown as a blocking native alert) and the ones that only end up
/// in the status line and the log.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::MAX_UPLOAD_BYTES;

/// Failures while reading or writing the persisted history
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("history storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored history is malformed: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    /// The staged file is not image-typed
    #[error("not an image: {}", .path.display())]
    InvalidMediaType { path: PathBuf },

    #[error("File size exceeds 5MB limit. Please choose a smaller image.")]
    SizeLimitExceeded { size: u64 },

    /// Export, share or save requested before any completed analysis
    #[error("Please analyze an image first")]
    NoAnalysisYet,

    #[error("could not decode image: {0}")]
    Decode(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("could not write report: {0}")]
    Report(#[source] std::io::Error),
}

impl AppError {
    /// Whether this error must be acknowledged through a blocking alert
    pub fn is_blocking(&self) -> bool {
        matches!(self, AppError::SizeLimitExceeded { .. } | AppError::NoAnalysisYet)
    }

    /// Whether this error is dropped without telling the user
    pub fn is_silent(&self) -> bool {
        matches!(self, AppError::InvalidMediaType { .. })
    }
}

/// Size check for staged uploads
pub fn check_upload_size(size: u64) -> Result<(), AppError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(AppError::SizeLimitExceeded { size });
    }
    Ok(())
}
