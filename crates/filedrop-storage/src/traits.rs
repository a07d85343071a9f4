//! File writer abstraction trait
//!
//! This module defines the narrow capability every storage backend provides
//! to the upload manager: put bytes at a fully resolved path, or take them away.

use async_trait::async_trait;
use bytes::Bytes;
use filedrop_core::UploadResult;

/// Byte-level persistence for a single, fully resolved path.
///
/// Implementations know nothing about sub-directories or naming; the manager
/// hands them the final path. This is the only layer that touches file contents.
#[async_trait]
pub trait FileWriter: Send + Sync {
    /// Write `content` to `full_path`, creating or truncating the file.
    ///
    /// With `overwrite == false` an existing file is left untouched and
    /// `UploadError::DuplicateFile` is returned.
    async fn write(&self, content: Bytes, full_path: &str, overwrite: bool) -> UploadResult<()>;

    /// Delete the file at `full_path`. A missing file is not an error.
    async fn remove(&self, full_path: &str) -> UploadResult<()>;

    /// Short backend name, for diagnostics
    fn backend_name(&self) -> &'static str;
}
