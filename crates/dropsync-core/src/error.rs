//! Error types module
//!
//! All intake-facing failures are unified under the [`AppError`] enum. Errors
//! self-describe how they should be surfaced to the user through the
//! [`ErrorMetadata`] trait: a machine-readable code, whether the operation can
//! be retried, the user-facing message, and the level they should be logged at.

use uuid::Uuid;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like resource limits
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error presentation - defines how an error should be surfaced.
/// This trait allows errors to self-describe their user-facing characteristics.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "QUOTA_EXCEEDED")
    fn error_code(&self) -> &'static str;

    /// Whether the operation that produced this error can be retried
    fn is_recoverable(&self) -> bool;

    /// User-facing message (may differ from the internal error message)
    fn user_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    #[error("quota exceeded: {used} + {incoming} bytes exceeds {limit} byte limit")]
    QuotaExceeded { used: u64, incoming: u64, limit: u64 },

    #[error("validation failed for {filename}: {}", .messages.join(", "))]
    ValidationFailed {
        filename: String,
        messages: Vec<String>,
    },

    #[error("upload failed for {filename}")]
    UploadFailed { filename: String },

    #[error("file not found: {0}")]
    FileNotFound(Uuid),

    #[error("folder not found: {0}")]
    FolderNotFound(Uuid),

    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// Static metadata for each variant: (error_code, recoverable, log_level).
/// user_message stays per-variant for dynamic content.
fn app_error_static_metadata(err: &AppError) -> (&'static str, bool, LogLevel) {
    match err {
        AppError::QuotaExceeded { .. } => ("QUOTA_EXCEEDED", true, LogLevel::Warn),
        AppError::ValidationFailed { .. } => ("VALIDATION_FAILED", false, LogLevel::Debug),
        AppError::UploadFailed { .. } => ("UPLOAD_FAILED", false, LogLevel::Error),
        AppError::FileNotFound(_) => ("FILE_NOT_FOUND", false, LogLevel::Debug),
        AppError::FolderNotFound(_) => ("FOLDER_NOT_FOUND", false, LogLevel::Debug),
        AppError::InvalidRecord(_) => ("INVALID_RECORD", false, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for detailed reports
    pub fn error_type(&self) -> &str {
        match self {
            AppError::QuotaExceeded { .. } => "QuotaExceeded",
            AppError::ValidationFailed { .. } => "ValidationFailed",
            AppError::UploadFailed { .. } => "UploadFailed",
            AppError::FileNotFound(_) => "FileNotFound",
            AppError::FolderNotFound(_) => "FolderNotFound",
            AppError::InvalidRecord(_) => "InvalidRecord",
        }
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }

    fn user_message(&self) -> String {
        match self {
            AppError::QuotaExceeded { limit, .. } => {
                format!(
                    "Total file size exceeds {} limit",
                    crate::units::human_size(*limit)
                )
            }
            AppError::ValidationFailed { filename, messages } => {
                format!("{}: {}", filename, messages.join(", "))
            }
            AppError::UploadFailed { filename } => format!("Failed to upload {}", filename),
            AppError::FileNotFound(_) => "File not found".to_string(),
            AppError::FolderNotFound(_) => "Folder not found".to_string(),
            AppError::InvalidRecord(_) => "Internal error".to_string(),
        }
    }
}
