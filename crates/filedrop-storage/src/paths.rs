//! Path normalization and directory materialization.
//!
//! Canonical filesystem paths are absolute and end with a separator:
//! `/data/up/` on POSIX hosts, `C:\data\up\` on Windows hosts. Canonical URL
//! paths always look like `/upload/a/`.

use std::io::ErrorKind;

use filedrop_core::{PathStyle, UploadError, UploadResult};
use tokio::fs;

/// Split a raw path into trimmed, non-empty segments, accepting both `/` and `\`.
fn path_segments(raw: &str) -> UploadResult<Vec<&str>> {
    if raw.trim().is_empty() {
        return Err(UploadError::InvalidPath(
            "path must not be empty".to_string(),
        ));
    }

    let segments: Vec<&str> = raw
        .split(['/', '\\'])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        return Err(UploadError::InvalidPath(format!(
            "'{}' has no path segments",
            raw
        )));
    }

    Ok(segments)
}

/// Extension of a client-supplied file name: the text after the last `.`.
///
/// Trailing empty pieces are ignored, so `"a."` yields `"a"`; a name without
/// any `.` yields the whole (trimmed) name. An extension containing a path
/// separator is rejected, since it ends up in the storage path.
pub fn extract_extension(file_name: &str) -> UploadResult<String> {
    let file_name = file_name.trim();
    if file_name.is_empty() {
        return Err(UploadError::InvalidArgument(
            "file name must not be empty".to_string(),
        ));
    }

    let extension = file_name
        .split('.')
        .rev()
        .find(|piece| !piece.is_empty())
        .unwrap_or("");

    if extension.contains(['/', '\\']) {
        return Err(UploadError::InvalidArgument(format!(
            "extension of '{}' contains a path separator",
            file_name
        )));
    }

    Ok(extension.to_string())
}

/// Reject a sub-directory with `.` or `..` segments, which would resolve
/// outside the fs base path.
pub(crate) fn check_sub_dir(sub_dir: &str) -> UploadResult<()> {
    let escapes = sub_dir
        .split(['/', '\\'])
        .map(str::trim)
        .any(|segment| segment == "." || segment == "..");
    if escapes {
        return Err(UploadError::InvalidArgument(format!(
            "sub directory '{}' must not contain '.' or '..' segments",
            sub_dir
        )));
    }
    Ok(())
}

/// Reject a stored file name that is not a single plain path component.
pub(crate) fn check_file_name(file_name: &str) -> UploadResult<()> {
    if file_name.contains(['/', '\\']) || file_name.contains("..") || file_name == "." {
        return Err(UploadError::InvalidArgument(format!(
            "file name '{}' must be a single path component",
            file_name
        )));
    }
    Ok(())
}

/// Converts raw path strings into canonical form for one host path style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathNormalizer {
    style: PathStyle,
}

impl PathNormalizer {
    pub fn new(style: PathStyle) -> Self {
        PathNormalizer { style }
    }

    pub fn style(&self) -> PathStyle {
        self.style
    }

    /// Canonical absolute filesystem path for this normalizer's style.
    pub fn normalize_fs_path(&self, raw: &str) -> UploadResult<String> {
        let segments = path_segments(raw)?;
        let sep = self.style.separator().to_string();
        let joined = segments.join(&sep);

        if self.style.is_windows() {
            Ok(format!("{joined}{sep}"))
        } else {
            Ok(format!("{sep}{joined}{sep}"))
        }
    }

    /// Canonical URL path; the host style plays no part.
    pub fn normalize_url_path(&self, raw: &str) -> UploadResult<String> {
        let segments = path_segments(raw)?;
        Ok(format!("/{}/", segments.join("/")))
    }

    /// Create `path` unless it already is a directory. The parent must exist.
    ///
    /// A directory created concurrently by someone else counts as success.
    pub async fn ensure_directory(&self, path: &str) -> UploadResult<()> {
        let path = path.trim();
        if path.is_empty() {
            return Err(UploadError::InvalidArgument(
                "directory path must not be empty".to_string(),
            ));
        }

        if is_directory(path).await {
            return Ok(());
        }

        match fs::create_dir(path).await {
            Ok(()) => {
                tracing::debug!(path = %path, "Created upload directory");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists && is_directory(path).await => Ok(()),
            Err(e) => Err(UploadError::io(path, e)),
        }
    }

    /// Create `path` and every missing ancestor, one level at a time from the root.
    ///
    /// Stops at the first failing level, leaving the levels above it in place.
    pub async fn ensure_directory_recursive(&self, path: &str) -> UploadResult<()> {
        let segments = path_segments(path)?;
        let sep = self.style.separator();

        let mut current = if self.style.is_windows() {
            format!("{}{sep}", segments[0])
        } else {
            format!("{sep}{}{sep}", segments[0])
        };
        self.ensure_directory(&current).await?;

        for segment in &segments[1..] {
            current.push_str(segment);
            current.push(sep);
            self.ensure_directory(&current).await?;
        }

        Ok(())
    }
}

async fn is_directory(path: &str) -> bool {
    fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}
