use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata describing a file stored by the upload manager.
///
/// Created once per successful save. Removing the stored file does not touch
/// the record; callers drop it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Name supplied by the client. Never used to build paths.
    pub original_name: String,
    /// Extension taken from `original_name`
    pub file_type: String,
    /// Canonical filesystem path, including file name and extension
    pub storage_path: String,
    /// Canonical URL path serving `storage_path`
    pub public_path: String,
    pub size_bytes: u64,
    pub saved_at: DateTime<Utc>,
}

impl UploadedFile {
    /// Final path component shared by `storage_path` and `public_path`
    pub fn stored_file_name(&self) -> &str {
        self.public_path
            .rsplit('/')
            .next()
            .unwrap_or(self.public_path.as_str())
    }
}
