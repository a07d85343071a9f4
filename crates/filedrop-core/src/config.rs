//! Configuration module
//!
//! Raw upload settings as read from the environment. Values are kept as the
//! operator wrote them; parsing and normalization happen when a manager is
//! configured from them.

use std::env;
use std::path::Path;

use crate::error::UploadError;
use crate::path_style::PathStyle;

pub const DEFAULT_URL_BASE_PATH: &str = "/upload/";
pub const DEFAULT_SIZE_LIMIT: &str = "10Mb";
/// Directory created under the working directory when no fs base path is set
pub const DEFAULT_FS_DIR_NAME: &str = "uploaded";

// Compatibility key first, upper-snake alias second.
const FS_BASE_PATH_KEYS: &[&str] = &["upload.fsBasePath", "UPLOAD_FS_BASE_PATH"];
const URL_BASE_PATH_KEYS: &[&str] = &["upload.urlBasePath", "UPLOAD_URL_BASE_PATH"];
const SIZE_LIMIT_KEYS: &[&str] = &["upload.sizeLimit", "UPLOAD_SIZE_LIMIT"];
const PATH_STYLE_KEYS: &[&str] = &["UPLOAD_PATH_STYLE"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadSettings {
    pub fs_base_path: String,
    pub url_base_path: String,
    pub size_limit: String,
    pub path_style: PathStyle,
}

impl UploadSettings {
    /// Load settings from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, UploadError> {
        dotenvy::dotenv().ok();

        let working_dir = env::current_dir().map_err(|e| {
            UploadError::InvalidConfig(format!("cannot resolve working directory: {}", e))
        })?;

        Self::from_lookup(|key| env::var(key).ok(), &working_dir)
    }

    /// Load settings through an arbitrary key lookup.
    ///
    /// `working_dir` anchors the default fs base path.
    pub fn from_lookup<F>(lookup: F, working_dir: &Path) -> Result<Self, UploadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first_set = |keys: &[&str]| {
            keys.iter()
                .filter_map(|&key| lookup(key))
                .find(|value| !value.trim().is_empty())
        };

        let fs_base_path = first_set(FS_BASE_PATH_KEYS).unwrap_or_else(|| {
            format!("{}/{}/", working_dir.display(), DEFAULT_FS_DIR_NAME)
        });
        let url_base_path =
            first_set(URL_BASE_PATH_KEYS).unwrap_or_else(|| DEFAULT_URL_BASE_PATH.to_string());
        let size_limit =
            first_set(SIZE_LIMIT_KEYS).unwrap_or_else(|| DEFAULT_SIZE_LIMIT.to_string());

        let path_style = match first_set(PATH_STYLE_KEYS) {
            Some(value) => value
                .parse()
                .map_err(|e: anyhow::Error| UploadError::InvalidConfig(e.to_string()))?,
            None => PathStyle::host(),
        };

        Ok(UploadSettings {
            fs_base_path,
            url_base_path,
            size_limit,
            path_style,
        })
    }
}
