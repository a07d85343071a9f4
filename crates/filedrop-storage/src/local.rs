use crate::traits::FileWriter;
use async_trait::async_trait;
use bytes::Bytes;
use filedrop_core::{UploadError, UploadResult};
use std::io::ErrorKind;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem writer
#[derive(Clone, Debug, Default)]
pub struct LocalFileWriter;

impl LocalFileWriter {
    pub fn new() -> Self {
        LocalFileWriter
    }
}

fn require_path(full_path: &str) -> UploadResult<&str> {
    let full_path = full_path.trim();
    if full_path.is_empty() {
        return Err(UploadError::InvalidArgument(
            "file path must not be empty".to_string(),
        ));
    }
    Ok(full_path)
}

#[async_trait]
impl FileWriter for LocalFileWriter {
    async fn write(&self, content: Bytes, full_path: &str, overwrite: bool) -> UploadResult<()> {
        let path = require_path(full_path)?;

        if !overwrite {
            let taken = fs::try_exists(path)
                .await
                .map_err(|e| UploadError::io(path, e))?;
            if taken {
                return Err(UploadError::DuplicateFile(path.to_string()));
            }
        }

        let start = std::time::Instant::now();

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .await
            .map_err(|e| UploadError::io(path, e))?;

        file.write_all(&content)
            .await
            .map_err(|e| UploadError::io(path, e))?;

        file.sync_all().await.map_err(|e| UploadError::io(path, e))?;

        tracing::info!(
            path = %path,
            size_bytes = content.len(),
            overwrite,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local file write successful"
        );

        Ok(())
    }

    async fn remove(&self, full_path: &str) -> UploadResult<()> {
        let path = require_path(full_path)?;
        let start = std::time::Instant::now();

        match fs::remove_file(path).await {
            Ok(()) => {
                tracing::info!(
                    path = %path,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Local file delete successful"
                );
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(UploadError::io(path, e)),
        }
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}
