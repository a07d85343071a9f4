//! Upload size limit parsing.
//!
//! Limits are written the way operators type them: a positive integer followed
//! by `Kb` or `Mb`, in any letter case (`"500Kb"`, `"10mb"`).

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::UploadError;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

static SIZE_LIMIT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([0-9]+)(kb|mb)$").expect("size limit pattern is valid")
});

/// A parsed upload size limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeLimit {
    spec: String,
    bytes: u64,
}

impl SizeLimit {
    /// Parse a limit such as `"10Mb"`.
    ///
    /// Fails with `InvalidConfig` for an unknown unit, a zero, negative or
    /// non-numeric magnitude, or a value that does not fit in 64 bits.
    pub fn parse(spec: &str) -> Result<Self, UploadError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(UploadError::InvalidConfig(
                "size limit must not be empty".to_string(),
            ));
        }

        let captures = SIZE_LIMIT_PATTERN.captures(spec).ok_or_else(|| {
            UploadError::InvalidConfig(format!(
                "size limit '{}' must be a positive integer followed by Kb or Mb",
                spec
            ))
        })?;

        let magnitude: u64 = captures[1].parse().map_err(|_| {
            UploadError::InvalidConfig(format!("size limit '{}' is too large", spec))
        })?;
        if magnitude == 0 {
            return Err(UploadError::InvalidConfig(format!(
                "size limit '{}' must be a positive integer",
                spec
            )));
        }

        let multiplier = if captures[2].eq_ignore_ascii_case("kb") {
            KIB
        } else {
            MIB
        };
        let bytes = magnitude.checked_mul(multiplier).ok_or_else(|| {
            UploadError::InvalidConfig(format!("size limit '{}' is too large", spec))
        })?;

        Ok(SizeLimit {
            spec: spec.to_string(),
            bytes,
        })
    }

    /// The limit as originally written, trimmed
    pub fn spec(&self) -> &str {
        &self.spec
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}

impl FromStr for SizeLimit {
    type Err = UploadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SizeLimit::parse(s)
    }
}

impl Display for SizeLimit {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.spec)
    }
}
