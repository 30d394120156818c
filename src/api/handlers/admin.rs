//! Admin handlers - secretless fetch/download and allow-list mutation.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::api::download_response::FileAttachment;
use crate::api::dto::{
    AddAdminRequest, AddAdminResponse, AdminDownloadRequest, AdminFetchQuery, FileDetailResponse,
};
use crate::api::SharedState;
use crate::error::Result;
use crate::services::policy_service::{self, Caller, Operation};

/// Fetch full file metadata (admin identity required)
pub async fn fetch(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AdminFetchQuery>,
) -> Result<Json<FileDetailResponse>> {
    let record = state.registry.get(id).await?;
    policy_service::authorize(
        Operation::AdminDownload,
        &record,
        &Caller::with_identity(query.identity),
        &state.admins,
    )?;

    Ok(Json(FileDetailResponse {
        id: record.id,
        original_name: record.original_name,
        uploader: record.uploader,
        description: record.description,
        size_bytes: record.size_bytes,
        checksum_sha256: record.checksum_sha256,
        uploaded_at: record.uploaded_at,
    }))
}

/// Download a file without its credential (admin identity required)
pub async fn download(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AdminDownloadRequest>,
) -> Result<FileAttachment> {
    let record = state.registry.get(id).await?;
    policy_service::authorize(
        Operation::AdminDownload,
        &record,
        &Caller::with_identity(request.identity),
        &state.admins,
    )?;

    let data = state.registry.fetch_blob(&record).await?;
    Ok(FileAttachment::new(data, record.original_name))
}

/// Grant admin status to a new identity (owner only)
pub async fn add_admin(
    State(state): State<SharedState>,
    Json(request): Json<AddAdminRequest>,
) -> Result<Json<AddAdminResponse>> {
    let admins = state.admins.add_admin(&request.requester, &request.identity)?;
    Ok(Json(AddAdminResponse { admins }))
}
