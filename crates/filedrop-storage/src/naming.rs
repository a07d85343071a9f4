//! Generated sub-directory and file names for uploads saved without explicit ones.
//!
//! The sub-directory spreads files over at most 256 two-hex-character buckets.
//! It is a fan-out device, not a secret.

use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use uuid::Uuid;

/// Two lowercase hex characters taken from an MD5 digest over the save time,
/// the client's file name and the declared size.
pub fn generate_sub_dir(saved_at: DateTime<Utc>, original_name: &str, declared_size: u64) -> String {
    let seed = format!("{}{}{}", saved_at.to_rfc3339(), original_name, declared_size);

    let mut hasher = Md5::new();
    hasher.update(seed.as_bytes());
    let digest = hex::encode(hasher.finalize());

    digest[..2].to_string()
}

/// Random UUID-style file name, without extension
pub fn generate_file_name() -> String {
    Uuid::new_v4().to_string()
}
