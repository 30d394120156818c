//! Filesystem blob store.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::BlobStore;
use crate::error::{AppError, Result};

/// Filesystem-based blob store
pub struct FilesystemStore {
    base_path: PathBuf,
}

impl FilesystemStore {
    /// Create new filesystem store
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Get full path for a key (using first 2 chars as subdirectory for distribution)
    fn key_to_path(&self, key: &str) -> PathBuf {
        // Generated keys are ascii hex, but the trait does not promise that;
        // fall back to the whole key when byte 2 is not a char boundary
        let prefix = key.get(..2).unwrap_or(key);
        self.base_path.join(prefix).join(key)
    }

    /// Remove leftover `.tmp` files from interrupted writes.
    ///
    /// A write abandoned mid-flight (client disconnect) leaves its temp
    /// file behind without ever linking a record. Run at startup, before
    /// the registry loads. Returns the number of files removed.
    pub async fn sweep_partial(&self) -> Result<usize> {
        let mut removed = 0;
        let mut stack = vec![self.base_path.clone()];

        while let Some(dir) = stack.pop() {
            if !dir.exists() {
                continue;
            }
            let mut entries = fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if path.is_dir() {
                    stack.push(path);
                } else if path.extension() == Some(std::ffi::OsStr::new("tmp")) {
                    fs::remove_file(&path).await?;
                    tracing::warn!(path = %path.display(), "Removed orphaned partial blob");
                    removed += 1;
                }
            }
        }

        Ok(removed)
    }
}

#[async_trait]
impl BlobStore for FilesystemStore {
    async fn put(&self, key: &str, content: Bytes) -> Result<()> {
        let path = self.key_to_path(key);

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write to a temp file, then rename into place so a partial write
        // (client disconnect, full disk) never becomes a readable blob
        let temp_path = path.with_extension("tmp");
        let result = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(&content).await?;
            file.sync_all().await?;
            drop(file);
            fs::rename(&temp_path, &path).await?;
            Ok(())
        }
        .await;

        if result.is_err() {
            // Clean up the orphaned partial blob
            let _ = fs::remove_file(&temp_path).await;
        }

        result
    }

    async fn get(&self, key: &str) -> Result<Bytes> {
        let path = self.key_to_path(key);
        let content = fs::read(&path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to read {}: {}", key, e)))?;
        Ok(Bytes::from(content))
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let path = self.key_to_path(key);
        Ok(path.exists())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.key_to_path(key);
        fs::remove_file(&path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to delete {}: {}", key, e)))?;
        Ok(())
    }
}
