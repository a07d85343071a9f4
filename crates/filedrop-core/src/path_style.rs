use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Host path conventions used when building filesystem paths.
///
/// Normalization never asks the OS which style applies; callers inject one,
/// usually `PathStyle::host()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// `/` separator, absolute paths look like `/root/dir/`
    Posix,
    /// `\` separator, absolute paths look like `C:\dir\`
    Windows,
}

impl PathStyle {
    /// Style of the platform this binary was built for
    pub fn host() -> Self {
        if cfg!(windows) {
            PathStyle::Windows
        } else {
            PathStyle::Posix
        }
    }

    pub fn separator(&self) -> char {
        match self {
            PathStyle::Posix => '/',
            PathStyle::Windows => '\\',
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, PathStyle::Windows)
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        PathStyle::host()
    }
}

impl FromStr for PathStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "posix" | "unix" => Ok(PathStyle::Posix),
            "windows" => Ok(PathStyle::Windows),
            _ => Err(anyhow::anyhow!("Invalid path style: {}", s)),
        }
    }
}

impl Display for PathStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PathStyle::Posix => write!(f, "posix"),
            PathStyle::Windows => write!(f, "windows"),
        }
    }
}
