//! File record model.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Credential protecting a single file.
///
/// Stored verbatim. Plaintext comparison with no hashing and no guess
/// throttling is an inherited weakness of this design; a hardening pass
/// would add constant-time comparison and rate limiting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Credential {
    /// Free-form high-entropy download secret
    Secret(String),
    /// 4-digit numeric PIN
    Pin(String),
}

impl Credential {
    /// The stored secret or PIN value
    pub fn value(&self) -> &str {
        match self {
            Credential::Secret(v) | Credential::Pin(v) => v,
        }
    }

    /// Whether this credential is a numeric PIN
    pub fn is_pin(&self) -> bool {
        matches!(self, Credential::Pin(_))
    }

    /// Whether `value` is a well-formed 4-digit PIN
    pub fn is_valid_pin(value: &str) -> bool {
        value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit())
    }
}

/// File record entity - one per uploaded file.
///
/// The registry upholds: `id` is unique across live records, `storage_key`
/// is referenced by exactly one record, and a record exists iff its blob
/// exists in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: Uuid,
    /// Opaque blob-store handle; not derivable from `id`
    pub storage_key: String,
    pub original_name: String,
    pub uploader: Option<String>,
    pub description: Option<String>,
    pub credential: Credential,
    pub checksum_sha256: String,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// Public projection of a file record.
///
/// Never carries `credential` or `storage_key`.
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub id: Uuid,
    pub original_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&FileRecord> for FileSummary {
    fn from(record: &FileRecord) -> Self {
        Self {
            id: record.id,
            original_name: record.original_name.clone(),
            uploader: record.uploader.clone(),
            description: record.description.clone(),
        }
    }
}

/// Input for creating a file record
#[derive(Debug, Clone)]
pub struct NewFile {
    pub original_name: String,
    pub credential: Credential,
    pub uploader: Option<String>,
    pub description: Option<String>,
    pub data: Bytes,
}
