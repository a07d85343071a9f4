//! Upload orchestration.
//!
//! A save runs as a sequence of checks followed by at most one write:
//! argument validation, size limit, directory resolution, duplicate check,
//! then the writer. Every rejection happens before the writer is called.
//!
//! Two saves racing on the same final path with `overwrite` set both pass the
//! duplicate check and the last write wins. Nothing here serializes them.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use filedrop_core::{UploadError, UploadResult, UploadedFile};
use tokio::fs;

use crate::config::ManagerConfig;
use crate::naming::{generate_file_name, generate_sub_dir};
use crate::paths::{check_file_name, check_sub_dir, extract_extension};
use crate::traits::FileWriter;

/// An uploaded file as handed over by the transport layer
#[derive(Clone, Debug)]
pub struct IncomingFile {
    pub content: Bytes,
    /// Client-supplied name; only its extension is used
    pub original_name: String,
    /// Size the client announced, checked against the limit
    pub declared_size: u64,
}

impl IncomingFile {
    /// Incoming file whose declared size is its actual length
    pub fn new(content: impl Into<Bytes>, original_name: impl Into<String>) -> Self {
        let content = content.into();
        IncomingFile {
            declared_size: content.len() as u64,
            content,
            original_name: original_name.into(),
        }
    }
}

/// Where and how to store an incoming file
#[derive(Clone, Debug)]
pub struct SaveOptions {
    /// Directory below the fs base path; may contain several levels
    pub sub_dir: String,
    /// Stored file name, without extension
    pub file_name: String,
    pub overwrite: bool,
}

impl SaveOptions {
    pub fn new(sub_dir: impl Into<String>, file_name: impl Into<String>) -> Self {
        SaveOptions {
            sub_dir: sub_dir.into(),
            file_name: file_name.into(),
            overwrite: true,
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

fn require_non_blank<'a>(value: &'a str, what: &str) -> UploadResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(UploadError::InvalidArgument(format!(
            "{} must not be empty",
            what
        )));
    }
    Ok(trimmed)
}

#[derive(Clone)]
pub struct UploadManager {
    config: ManagerConfig,
    writer: Arc<dyn FileWriter>,
}

impl UploadManager {
    pub fn new(config: ManagerConfig, writer: Arc<dyn FileWriter>) -> Self {
        UploadManager { config, writer }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn writer(&self) -> &Arc<dyn FileWriter> {
        &self.writer
    }

    /// Store `file` at `{fs_base}/{sub_dir}/{file_name}.{ext}`.
    pub async fn save_file(
        &self,
        file: IncomingFile,
        options: SaveOptions,
    ) -> UploadResult<UploadedFile> {
        let sub_dir = require_non_blank(&options.sub_dir, "sub directory")?;
        let file_name = require_non_blank(&options.file_name, "file name")?;
        let original_name = require_non_blank(&file.original_name, "original file name")?;
        check_sub_dir(sub_dir)?;
        check_file_name(file_name)?;

        // The content length is checked too, so an understated declaration
        // cannot slip a larger body past the limit.
        let limit = self.config.size_limit_bytes();
        let size_bytes = file.content.len() as u64;
        let checked_size = file.declared_size.max(size_bytes);
        if checked_size > limit {
            return Err(UploadError::SizeLimitExceeded {
                declared: checked_size,
                limit,
            });
        }

        let file_type = extract_extension(original_name)?;

        let normalizer = self.config.normalizer();
        let target_dir = normalizer
            .normalize_fs_path(&format!("{}/{}", self.config.fs_base_path(), sub_dir))?;
        let dir_exists = fs::try_exists(&target_dir)
            .await
            .map_err(|e| UploadError::io(target_dir.as_str(), e))?;
        if !dir_exists {
            normalizer.ensure_directory_recursive(&target_dir).await?;
        }

        let stored_name = format!("{}.{}", file_name, file_type);
        let storage_path = format!("{}{}", target_dir, stored_name);

        if !options.overwrite {
            let taken = fs::try_exists(&storage_path)
                .await
                .map_err(|e| UploadError::io(storage_path.as_str(), e))?;
            if taken {
                return Err(UploadError::DuplicateFile(storage_path));
            }
        }

        self.writer
            .write(file.content, &storage_path, options.overwrite)
            .await?;

        let public_path = format!(
            "{}{}",
            normalizer.normalize_url_path(&format!("{}/{}", self.config.url_base_path(), sub_dir))?,
            stored_name
        );

        let record = UploadedFile {
            original_name: file.original_name,
            file_type,
            storage_path,
            public_path,
            size_bytes,
            saved_at: Utc::now(),
        };

        tracing::debug!(
            stored_name = record.stored_file_name(),
            storage_path = %record.storage_path,
            public_path = %record.public_path,
            size_bytes,
            backend = self.writer.backend_name(),
            "Upload saved"
        );

        Ok(record)
    }

    /// Store `file` under a generated two-character sub-directory and UUID
    /// file name, replacing any file already there.
    pub async fn save_file_generated(&self, file: IncomingFile) -> UploadResult<UploadedFile> {
        let sub_dir = generate_sub_dir(Utc::now(), &file.original_name, file.declared_size);
        let options = SaveOptions::new(sub_dir, generate_file_name());
        self.save_file(file, options).await
    }

    /// Delete a stored file by its full filesystem path.
    pub async fn remove_file(&self, full_path: &str) -> UploadResult<()> {
        let full_path = require_non_blank(full_path, "file path")?;
        self.writer.remove(full_path).await
    }

    /// Delete the file behind a record returned by an earlier save.
    pub async fn remove_record(&self, record: &UploadedFile) -> UploadResult<()> {
        self.remove_file(&record.storage_path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::LocalFileWriter;
    use async_trait::async_trait;
    use filedrop_core::{ErrorMetadata, PathStyle};
    use std::sync::Mutex;
    use tempfile::{tempdir, TempDir};

    /// Delegates to the local writer and records every call it receives
    #[derive(Default)]
    struct RecordingWriter {
        inner: LocalFileWriter,
        writes: Mutex<Vec<(String, bool)>>,
        removes: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl FileWriter for RecordingWriter {
        async fn write(&self, content: Bytes, full_path: &str, overwrite: bool) -> UploadResult<()> {
            self.writes
                .lock()
                .unwrap()
                .push((full_path.to_string(), overwrite));
            self.inner.write(content, full_path, overwrite).await
        }

        async fn remove(&self, full_path: &str) -> UploadResult<()> {
            self.removes.lock().unwrap().push(full_path.to_string());
            self.inner.remove(full_path).await
        }

        fn backend_name(&self) -> &'static str {
            "recording"
        }
    }

    fn setup(limit: &str) -> (TempDir, UploadManager, Arc<RecordingWriter>) {
        let dir = tempdir().unwrap();
        let config = ManagerConfig::configure(
            dir.path().to_str().unwrap(),
            "/files/",
            limit,
            PathStyle::host(),
        )
        .unwrap();
        let writer = Arc::new(RecordingWriter::default());
        let manager = UploadManager::new(config, writer.clone());
        (dir, manager, writer)
    }

    #[tokio::test]
    async fn save_builds_matching_paths() {
        let (_dir, manager, writer) = setup("1Kb");

        let record = manager
            .save_file(
                IncomingFile::new(vec![7u8; 500], "photo.JPG"),
                SaveOptions::new("a/b", "x").overwrite(false),
            )
            .await
            .unwrap();

        assert_eq!(record.file_type, "JPG");
        assert_eq!(record.public_path, "/files/a/b/x.JPG");
        assert_eq!(record.size_bytes, 500);
        assert!(record.storage_path.starts_with(manager.config().fs_base_path()));
        assert_eq!(
            manager.config().public_path_for(&record.storage_path).as_deref(),
            Some(record.public_path.as_str())
        );
        assert_eq!(std::fs::read(&record.storage_path).unwrap(), vec![7u8; 500]);
        assert_eq!(writer.writes.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn size_limit_is_inclusive() {
        let (_dir, manager, _writer) = setup("1Kb");

        let record = manager
            .save_file(
                IncomingFile::new(vec![0u8; 1024], "edge.bin"),
                SaveOptions::new("s", "edge"),
            )
            .await
            .unwrap();
        assert_eq!(record.size_bytes, 1024);
    }

    #[tokio::test]
    async fn oversize_upload_never_reaches_writer() {
        let (dir, manager, writer) = setup("1Kb");

        let err = manager
            .save_file(
                IncomingFile::new(vec![0u8; 1025], "big.bin"),
                SaveOptions::new("big", "big"),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            UploadError::SizeLimitExceeded {
                declared: 1025,
                limit: 1024
            }
        ));
        assert!(writer.writes.lock().unwrap().is_empty());
        assert!(!dir.path().join("big").exists());
    }

    #[tokio::test]
    async fn declared_size_alone_can_exceed_limit() {
        let (_dir, manager, writer) = setup("1Kb");

        let file = IncomingFile {
            content: Bytes::from_static(b"tiny"),
            original_name: "tiny.txt".to_string(),
            declared_size: 4096,
        };
        let err = manager
            .save_file(file, SaveOptions::new("t", "tiny"))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::SizeLimitExceeded { .. }));
        assert!(writer.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_is_rejected_before_writer() {
        let (_dir, manager, writer) = setup("1Kb");
        let options = SaveOptions::new("dup", "same").overwrite(false);

        let first = manager
            .save_file(IncomingFile::new(&b"first"[..], "a.txt"), options.clone())
            .await
            .unwrap();

        let err = manager
            .save_file(IncomingFile::new(&b"second"[..], "a.txt"), options)
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::DuplicateFile(ref p) if *p == first.storage_path));
        assert_eq!(writer.writes.lock().unwrap().len(), 1);
        assert_eq!(std::fs::read(&first.storage_path).unwrap(), b"first");
    }

    #[tokio::test]
    async fn overwrite_replaces_content() {
        let (_dir, manager, _writer) = setup("1Kb");

        manager
            .save_file(
                IncomingFile::new(&b"old content that is longer"[..], "n.txt"),
                SaveOptions::new("o", "n"),
            )
            .await
            .unwrap();
        let record = manager
            .save_file(
                IncomingFile::new(&b"new"[..], "n.txt"),
                SaveOptions::new("o", "n").overwrite(true),
            )
            .await
            .unwrap();

        assert_eq!(std::fs::read(&record.storage_path).unwrap(), b"new");
    }

    #[tokio::test]
    async fn blank_arguments_are_rejected() {
        let (_dir, manager, writer) = setup("1Kb");

        for (sub_dir, name, original) in [(" ", "x", "a.txt"), ("d", "", "a.txt"), ("d", "x", "  ")]
        {
            let err = manager
                .save_file(
                    IncomingFile::new(&b"x"[..], original),
                    SaveOptions::new(sub_dir, name),
                )
                .await
                .unwrap_err();
            assert!(matches!(err, UploadError::InvalidArgument(_)));
        }
        assert!(matches!(
            manager.remove_file("  ").await,
            Err(UploadError::InvalidArgument(_))
        ));
        assert!(writer.writes.lock().unwrap().is_empty());
        assert!(writer.removes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn traversal_in_options_is_rejected_before_any_write() {
        let (dir, manager, writer) = setup("1Kb");
        let base = dir.path().join("base");
        let config = ManagerConfig::configure(
            base.to_str().unwrap(),
            "/files/",
            "1Kb",
            PathStyle::host(),
        )
        .unwrap();
        let manager = UploadManager::new(config, manager.writer().clone());

        for (sub_dir, name) in [("..", "escaped"), ("d", "../../escaped2"), ("d/../..", "x")] {
            let err = manager
                .save_file(
                    IncomingFile::new(&b"payload"[..], "a.txt"),
                    SaveOptions::new(sub_dir, name),
                )
                .await
                .unwrap_err();
            assert!(matches!(err, UploadError::InvalidArgument(_)));
        }

        assert!(writer.writes.lock().unwrap().is_empty());
        assert!(!base.exists());
        assert!(!dir.path().join("escaped.txt").exists());
        assert!(!dir.path().join("escaped2.txt").exists());
    }

    #[tokio::test]
    async fn separator_in_extension_is_a_client_error() {
        let (dir, manager, writer) = setup("1Kb");

        let err = manager
            .save_file(
                IncomingFile::new(&b"x"[..], "a.b/c"),
                SaveOptions::new("d", "n"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::InvalidArgument(_)));
        assert_eq!(err.http_status_code(), 400);
        assert!(writer.writes.lock().unwrap().is_empty());
        assert!(!dir.path().join("d").exists());
    }

    #[tokio::test]
    async fn generated_save_uses_hex_bucket_and_uuid() {
        let (_dir, manager, writer) = setup("1Kb");

        let record = manager
            .save_file_generated(IncomingFile::new(&b"hello"[..], "greeting.txt"))
            .await
            .unwrap();

        let relative = record.public_path.strip_prefix("/files/").unwrap();
        let (bucket, stored) = relative.split_once('/').unwrap();
        assert_eq!(bucket.len(), 2);
        assert!(bucket.chars().all(|c| c.is_ascii_hexdigit()));
        let stem = stored.strip_suffix(".txt").unwrap();
        assert!(uuid::Uuid::parse_str(stem).is_ok());
        assert!(writer.writes.lock().unwrap()[0].1);
    }

    #[tokio::test]
    async fn remove_record_round_trip() {
        let (_dir, manager, writer) = setup("1Kb");

        let record = manager
            .save_file_generated(IncomingFile::new(&b"bye"[..], "bye.txt"))
            .await
            .unwrap();

        manager.remove_record(&record).await.unwrap();
        assert!(!std::path::Path::new(&record.storage_path).exists());

        manager.remove_record(&record).await.unwrap();
        assert_eq!(
            *writer.removes.lock().unwrap(),
            vec![record.storage_path.clone(), record.storage_path.clone()]
        );
    }
}
