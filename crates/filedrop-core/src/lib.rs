//! Filedrop Core Library
//!
//! This crate provides the error taxonomy, configuration, size-limit parsing
//! and record types shared by the storage layer and the CLI.

pub mod config;
pub mod error;
pub mod models;
pub mod path_style;
pub mod size_limit;

// Re-export commonly used types
pub use config::UploadSettings;
pub use error::{ErrorMetadata, LogLevel, UploadError, UploadResult};
pub use models::UploadedFile;
pub use path_style::PathStyle;
pub use size_limit::SizeLimit;
