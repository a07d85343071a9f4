//! Filedrop Storage Library
//!
//! Path normalization, the `FileWriter` capability with its local filesystem
//! implementation, and the `UploadManager` that decides where an upload lands.
//!
//! # Path layout
//!
//! A save with sub-directory `a/b` and file name `x` for an upload called
//! `photo.JPG` produces:
//!
//! - **storage path**: `{fs_base_path}a/b/x.JPG` (host separators)
//! - **public path**: `{url_base_path}a/b/x.JPG`
//!
//! Both bases are canonical (leading and trailing separator), so the two paths
//! always share the same suffix.

pub mod config;
pub mod factory;
pub mod local;
pub mod manager;
pub(crate) mod naming;
pub mod paths;
pub mod traits;

// Re-export commonly used types
pub use config::{ManagerConfig, StaticMapping};
pub use factory::create_upload_manager;
pub use local::LocalFileWriter;
pub use manager::{IncomingFile, SaveOptions, UploadManager};
pub use paths::{extract_extension, PathNormalizer};
pub use traits::FileWriter;
