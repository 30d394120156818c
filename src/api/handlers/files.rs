//! File handlers - upload, list, download, delete.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use uuid::Uuid;

use crate::api::download_response::FileAttachment;
use crate::api::dto::{DeleteRequest, DeleteResponse, DownloadRequest, UploadResponse};
use crate::api::SharedState;
use crate::config::CredentialMode;
use crate::error::{AppError, Result};
use crate::models::{Credential, FileSummary, NewFile};
use crate::services::policy_service::{self, Caller, Operation};

/// Upload a file.
///
/// Multipart fields: `file` (required), `credential`, `uploader`,
/// `description`. In secret mode a missing credential is generated
/// server-side; in PIN mode the uploader must supply a 4-digit PIN.
pub async fn upload(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    let mut data: Option<Bytes> = None;
    let mut original_name: Option<String> = None;
    let mut credential: Option<String> = None;
    let mut uploader: Option<String> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                original_name = field.file_name().map(str::to_string);
                data = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read file part: {}", e))
                })?);
            }
            Some("credential") => credential = Some(read_text(field).await?),
            Some("uploader") => uploader = Some(read_text(field).await?),
            Some("description") => description = Some(read_text(field).await?),
            _ => {}
        }
    }

    let data = data.ok_or_else(|| AppError::Validation("Missing file part".to_string()))?;
    let original_name = original_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation("Missing file name".to_string()))?;

    let credential = credential.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
    let credential = match state.config.credential_mode {
        CredentialMode::Pin => {
            let pin = credential
                .ok_or_else(|| AppError::Validation("Missing PIN".to_string()))?;
            if !Credential::is_valid_pin(&pin) {
                return Err(AppError::Validation(
                    "PIN must be exactly 4 digits".to_string(),
                ));
            }
            Credential::Pin(pin)
        }
        CredentialMode::Secret => {
            Credential::Secret(credential.unwrap_or_else(|| state.secrets.generate()))
        }
    };

    let record = state
        .registry
        .create(NewFile {
            original_name,
            credential,
            uploader: uploader.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()),
            description: description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            data,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            id: record.id,
            credential: record.credential.value().to_string(),
        }),
    ))
}

/// List all files (public projection, no credentials, no storage keys)
pub async fn list(State(state): State<SharedState>) -> Json<Vec<FileSummary>> {
    Json(state.registry.list().await)
}

/// Download a file with a presented credential or admin identity
pub async fn download(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(request): Json<DownloadRequest>,
) -> Result<FileAttachment> {
    let record = state.registry.get(id).await?;

    let caller = Caller {
        credential: request.credential,
        identity: request.identity,
    };
    policy_service::authorize(Operation::Download, &record, &caller, &state.admins)?;

    let data = state.registry.fetch_blob(&record).await?;
    Ok(FileAttachment::new(data, record.original_name))
}

/// Delete a file. Requires an admin identity.
pub async fn delete_file(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(request): Json<DeleteRequest>,
) -> Result<Json<DeleteResponse>> {
    let record = state.registry.get(id).await?;

    let caller = Caller {
        credential: request.credential,
        identity: request.identity,
    };
    policy_service::authorize(Operation::Delete, &record, &caller, &state.admins)?;

    state.registry.delete(id).await?;
    Ok(Json(DeleteResponse { deleted: true }))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read form field: {}", e)))
}
