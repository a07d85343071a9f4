use crate::{LocalFileWriter, ManagerConfig, UploadManager};
use filedrop_core::{UploadResult, UploadSettings};
use std::sync::Arc;

/// Create an upload manager writing to the local filesystem.
///
/// The fs base directory itself is created up front so a static-file layer can
/// serve from it before the first upload arrives.
pub async fn create_upload_manager(settings: &UploadSettings) -> UploadResult<UploadManager> {
    let config = ManagerConfig::from_settings(settings)?;

    config
        .normalizer()
        .ensure_directory_recursive(config.fs_base_path())
        .await?;

    tracing::info!(
        fs_base_path = %config.fs_base_path(),
        url_base_path = %config.url_base_path(),
        size_limit_bytes = config.size_limit_bytes(),
        "Upload manager configured"
    );

    Ok(UploadManager::new(config, Arc::new(LocalFileWriter::new())))
}
