//! Error types module
//!
//! Every failure the upload core can produce is a variant of `UploadError`.
//! Validation variants are raised before any filesystem side effect; `Io`
//! wraps whatever the filesystem reported, untouched.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected rejections such as bad arguments
    Debug,
    /// Client-caused rejections worth noticing (size, duplicates)
    Warn,
    /// Unexpected failures
    Error,
}

/// Metadata for error responses.
///
/// Lets a transport layer translate an error into a response without matching
/// on variants itself.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DUPLICATE_FILE")
    fn error_code(&self) -> &'static str;

    /// Whether the same request may succeed if retried unchanged
    fn is_recoverable(&self) -> bool;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("File size {declared} bytes exceeds limit of {limit} bytes")]
    SizeLimitExceeded { declared: u64, limit: u64 },

    #[error("File already exists: {0}")]
    DuplicateFile(String),

    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Result type for upload operations
pub type UploadResult<T> = Result<T, UploadError>;

impl UploadError {
    /// Wrap an IO error with the path it occurred on
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        UploadError::Io {
            path: path.into(),
            source,
        }
    }

    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            UploadError::InvalidArgument(_) => "InvalidArgument",
            UploadError::InvalidConfig(_) => "InvalidConfig",
            UploadError::InvalidPath(_) => "InvalidPath",
            UploadError::SizeLimitExceeded { .. } => "SizeLimitExceeded",
            UploadError::DuplicateFile(_) => "DuplicateFile",
            UploadError::Io { .. } => "IOFailure",
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, log_level).
fn upload_error_static_metadata(err: &UploadError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        UploadError::InvalidArgument(_) => (400, "INVALID_ARGUMENT", false, LogLevel::Debug),
        UploadError::InvalidConfig(_) => (500, "INVALID_CONFIG", false, LogLevel::Error),
        UploadError::InvalidPath(_) => (400, "INVALID_PATH", false, LogLevel::Debug),
        UploadError::SizeLimitExceeded { .. } => {
            (413, "SIZE_LIMIT_EXCEEDED", false, LogLevel::Warn)
        }
        UploadError::DuplicateFile(_) => (409, "DUPLICATE_FILE", false, LogLevel::Warn),
        UploadError::Io { .. } => (500, "IO_FAILURE", true, LogLevel::Error),
    }
}

impl ErrorMetadata for UploadError {
    fn http_status_code(&self) -> u16 {
        upload_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        upload_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        upload_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        upload_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            UploadError::InvalidArgument(ref msg) => msg.clone(),
            UploadError::InvalidPath(ref msg) => msg.clone(),
            UploadError::InvalidConfig(_) => "Upload service is misconfigured".to_string(),
            UploadError::SizeLimitExceeded { limit, .. } => {
                format!("File exceeds the upload limit of {} bytes", limit)
            }
            UploadError::DuplicateFile(_) => {
                "A file with the same name already exists".to_string()
            }
            // Storage paths stay server-side.
            UploadError::Io { .. } => "Failed to store file".to_string(),
        }
    }
}
