//! File registry.
//!
//! Authoritative mapping from file id to metadata record. Owns creation,
//! lookup, enumeration and deletion, and keeps the record collection
//! consistent with the blob store under concurrent mutation: a record
//! exists iff its blob exists.
//!
//! The collection lives in memory behind a `tokio::sync::RwLock`; mutations
//! take the write lock, reads share the read lock. When an index path is
//! configured, every successful mutation writes the collection through to a
//! JSON file under the same lock, so concurrent requests never race a
//! load-modify-save cycle on the file.

use std::path::PathBuf;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{FileRecord, FileSummary, NewFile};
use crate::services::secret_service::SecretGenerator;
use crate::storage::BlobStore;

/// Length of generated blob storage keys (hex chars)
const STORAGE_KEY_LENGTH: usize = 32;

/// File registry
pub struct FileRegistry {
    store: Arc<dyn BlobStore>,
    records: RwLock<Vec<FileRecord>>,
    index_path: Option<PathBuf>,
    keys: SecretGenerator,
}

impl FileRegistry {
    /// Create an empty in-memory registry with no index persistence
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            records: RwLock::new(Vec::new()),
            index_path: None,
            keys: SecretGenerator::new(STORAGE_KEY_LENGTH),
        }
    }

    /// Create a registry, loading any previously persisted index.
    ///
    /// Records whose blob no longer exists are dropped with a warning so
    /// the loaded state satisfies the metadata-iff-blob invariant.
    pub async fn load(store: Arc<dyn BlobStore>, index_path: Option<PathBuf>) -> Result<Self> {
        let mut records: Vec<FileRecord> = Vec::new();
        if let Some(path) = &index_path {
            if fs::try_exists(path).await? {
                let raw = fs::read(path).await?;
                records = serde_json::from_slice(&raw)?;
            }
        }

        let loaded = records.len();
        let mut kept = Vec::with_capacity(loaded);
        for record in records.drain(..) {
            if store.exists(&record.storage_key).await? {
                kept.push(record);
            } else {
                tracing::warn!(
                    id = %record.id,
                    name = %record.original_name,
                    "Dropping index entry with missing blob"
                );
            }
        }

        let registry = Self {
            store,
            records: RwLock::new(kept),
            index_path,
            keys: SecretGenerator::new(STORAGE_KEY_LENGTH),
        };

        {
            let records = registry.records.read().await;
            if records.len() != loaded {
                registry.persist(&records).await?;
            }
            tracing::info!(count = records.len(), "File registry loaded");
        }

        Ok(registry)
    }

    /// Calculate SHA-256 checksum of data
    pub fn calculate_sha256(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    /// Create a file record.
    ///
    /// The blob is written first; the record is published only after the
    /// store acknowledges the write, so readers never observe metadata for
    /// an unconfirmed blob. A blob failure leaves no metadata behind.
    pub async fn create(&self, new: NewFile) -> Result<FileRecord> {
        let id = Uuid::new_v4();
        let storage_key = self.keys.generate();
        let checksum_sha256 = Self::calculate_sha256(&new.data);
        let size_bytes = new.data.len() as u64;

        self.store.put(&storage_key, new.data).await?;

        let mut records = self.records.write().await;

        // A colliding UUID is an internal invariant violation, never a
        // silent overwrite. Unlink the blob we just wrote and fail fast.
        if records.iter().any(|r| r.id == id) {
            let _ = self.store.delete(&storage_key).await;
            return Err(AppError::Internal(format!(
                "Duplicate file id generated: {}",
                id
            )));
        }

        // Timestamps are non-decreasing in insertion order even if the
        // clock steps backwards between uploads.
        let mut uploaded_at = chrono::Utc::now();
        if let Some(last) = records.last() {
            uploaded_at = uploaded_at.max(last.uploaded_at);
        }

        let record = FileRecord {
            id,
            storage_key: storage_key.clone(),
            original_name: new.original_name,
            uploader: new.uploader,
            description: new.description,
            credential: new.credential,
            checksum_sha256,
            size_bytes,
            uploaded_at,
        };

        records.push(record.clone());

        if let Err(e) = self.persist(&records).await {
            // Roll back: the mutation is transactional with its write-through
            records.pop();
            let _ = self.store.delete(&storage_key).await;
            return Err(e);
        }

        tracing::info!(id = %record.id, name = %record.original_name, size_bytes, "File stored");
        Ok(record)
    }

    /// Look up a record by id
    pub async fn get(&self, id: Uuid) -> Result<FileRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("File not found: {}", id)))
    }

    /// All live records projected to their public summary, in insertion order
    pub async fn list(&self) -> Vec<FileSummary> {
        self.records
            .read()
            .await
            .iter()
            .map(FileSummary::from)
            .collect()
    }

    /// Delete a record and its blob as one logical operation.
    ///
    /// The blob is unlinked first; if the store refuses, the metadata stays
    /// so the inconsistency is visible and the delete retryable. A delete
    /// never ends with metadata pointing at a missing blob.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut records = self.records.write().await;
        let position = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("File not found: {}", id)))?;

        self.store.delete(&records[position].storage_key).await?;

        let record = records.remove(position);
        self.persist(&records).await?;

        tracing::info!(id = %record.id, name = %record.original_name, "File deleted");
        Ok(())
    }

    /// Fetch the blob bytes for a record
    pub async fn fetch_blob(&self, record: &FileRecord) -> Result<bytes::Bytes> {
        self.store.get(&record.storage_key).await
    }

    /// Write-through persistence hook. Callers hold the write lock (or the
    /// read lock during load), so index writes are serialized with the
    /// mutations they record.
    async fn persist(&self, records: &[FileRecord]) -> Result<()> {
        let Some(path) = &self.index_path else {
            return Ok(());
        };

        let json = serde_json::to_vec_pretty(records)?;
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &json)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write index: {}", e)))?;
        fs::rename(&temp_path, path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to replace index: {}", e)))?;
        Ok(())
    }
}
