//! Resolved manager configuration.
//!
//! Built once, then read-only. Both base paths are stored in canonical form so
//! the filesystem tree under `fs_base_path` maps 1:1 onto URLs under
//! `url_base_path`.

use filedrop_core::{PathStyle, SizeLimit, UploadError, UploadResult, UploadSettings};

use crate::paths::PathNormalizer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManagerConfig {
    fs_base_path: String,
    url_base_path: String,
    size_limit: SizeLimit,
    normalizer: PathNormalizer,
}

/// Route registration for a static-file layer serving uploads directly from disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticMapping {
    /// URL pattern, e.g. `/upload/**`
    pub url_pattern: String,
    /// File location, e.g. `file:////data/up/`
    pub file_location: String,
}

impl ManagerConfig {
    /// Parse and normalize the three upload settings for the given path style.
    pub fn configure(
        fs_base_path: &str,
        url_base_path: &str,
        size_limit: &str,
        style: PathStyle,
    ) -> UploadResult<Self> {
        if fs_base_path.trim().is_empty() {
            return Err(UploadError::InvalidArgument(
                "fs base path must not be empty".to_string(),
            ));
        }
        if url_base_path.trim().is_empty() {
            return Err(UploadError::InvalidArgument(
                "url base path must not be empty".to_string(),
            ));
        }

        let size_limit = SizeLimit::parse(size_limit)?;
        let normalizer = PathNormalizer::new(style);

        Ok(ManagerConfig {
            fs_base_path: normalizer.normalize_fs_path(fs_base_path)?,
            url_base_path: normalizer.normalize_url_path(url_base_path)?,
            size_limit,
            normalizer,
        })
    }

    pub fn from_settings(settings: &UploadSettings) -> UploadResult<Self> {
        Self::configure(
            &settings.fs_base_path,
            &settings.url_base_path,
            &settings.size_limit,
            settings.path_style,
        )
    }

    pub fn fs_base_path(&self) -> &str {
        &self.fs_base_path
    }

    pub fn url_base_path(&self) -> &str {
        &self.url_base_path
    }

    /// The limit as configured, e.g. `"10Mb"`
    pub fn size_limit(&self) -> &str {
        self.size_limit.spec()
    }

    pub fn size_limit_bytes(&self) -> u64 {
        self.size_limit.bytes()
    }

    pub fn normalizer(&self) -> PathNormalizer {
        self.normalizer
    }

    pub fn static_mapping(&self) -> StaticMapping {
        StaticMapping {
            url_pattern: format!("{}**", self.url_base_path),
            file_location: format!("file:///{}", self.fs_base_path),
        }
    }

    /// Public URL path for a file stored under `fs_base_path`.
    ///
    /// Returns `None` when `storage_path` lies outside the base directory.
    pub fn public_path_for(&self, storage_path: &str) -> Option<String> {
        let relative = storage_path.trim().strip_prefix(&self.fs_base_path)?;
        if relative.is_empty() {
            return None;
        }
        Some(format!(
            "{}{}",
            self.url_base_path,
            relative.replace('\\', "/")
        ))
    }
}
