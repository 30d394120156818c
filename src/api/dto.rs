//! Shared Data Transfer Objects (DTOs) for API handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response to a successful upload.
///
/// Carries the effective credential back to the client so server-generated
/// secrets are not lost.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: Uuid,
    pub credential: String,
}

/// Credentials presented with a download request
#[derive(Debug, Default, Deserialize)]
pub struct DownloadRequest {
    pub credential: Option<String>,
    pub identity: Option<String>,
}

/// Identity presented with an admin download request
#[derive(Debug, Deserialize)]
pub struct AdminDownloadRequest {
    pub identity: String,
}

/// Query parameters for the admin metadata fetch
#[derive(Debug, Deserialize)]
pub struct AdminFetchQuery {
    pub identity: String,
}

/// Full metadata view for admins. Credential and storage key stay private.
#[derive(Debug, Serialize)]
pub struct FileDetailResponse {
    pub id: Uuid,
    pub original_name: String,
    pub uploader: Option<String>,
    pub description: Option<String>,
    pub size_bytes: u64,
    pub checksum_sha256: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Credentials presented with a delete request
#[derive(Debug, Default, Deserialize)]
pub struct DeleteRequest {
    pub credential: Option<String>,
    pub identity: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddAdminRequest {
    pub requester: String,
    pub identity: String,
}

#[derive(Debug, Serialize)]
pub struct AddAdminResponse {
    pub admins: Vec<String>,
}
