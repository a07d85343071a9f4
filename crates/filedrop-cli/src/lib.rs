use filedrop_storage::UploadManager;
use serde::Serialize;

/// Diagnostic view of a configured manager
#[derive(Debug, Serialize)]
pub struct ConfigReport {
    pub fs_base_path: String,
    pub url_base_path: String,
    pub size_limit: String,
    pub size_limit_bytes: u64,
    pub writer_backend: &'static str,
    pub static_url_pattern: String,
    pub static_file_location: String,
}

impl ConfigReport {
    pub fn from_manager(manager: &UploadManager) -> Self {
        let config = manager.config();
        let mapping = config.static_mapping();
        ConfigReport {
            fs_base_path: config.fs_base_path().to_string(),
            url_base_path: config.url_base_path().to_string(),
            size_limit: config.size_limit().to_string(),
            size_limit_bytes: config.size_limit_bytes(),
            writer_backend: manager.writer().backend_name(),
            static_url_pattern: mapping.url_pattern,
            static_file_location: mapping.file_location,
        }
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedrop_core::PathStyle;
    use filedrop_storage::{LocalFileWriter, ManagerConfig};
    use std::sync::Arc;

    #[test]
    fn report_reflects_config() {
        let config =
            ManagerConfig::configure("/data/up", "/upload", "500kb", PathStyle::Posix).unwrap();
        let manager = UploadManager::new(config, Arc::new(LocalFileWriter::new()));

        let report = ConfigReport::from_manager(&manager);

        assert_eq!(report.fs_base_path, "/data/up/");
        assert_eq!(report.url_base_path, "/upload/");
        assert_eq!(report.size_limit, "500kb");
        assert_eq!(report.size_limit_bytes, 500 * 1024);
        assert_eq!(report.writer_backend, "local");
        assert_eq!(report.static_url_pattern, "/upload/**");
    }
}
