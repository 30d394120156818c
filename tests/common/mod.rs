//! Common test utilities for integration and router tests.
//!
//! Provides a tempdir-backed test context around the core services, a
//! blob store with injectable delete failures, and helpers for building
//! multipart upload requests against the router.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use bytes::Bytes;
use tempfile::TempDir;

use filedrop::api::{routes, AppState};
use filedrop::config::{Config, CredentialMode};
use filedrop::error::{AppError, Result};
use filedrop::services::admin_service::AdminRegistry;
use filedrop::services::registry_service::FileRegistry;
use filedrop::storage::{BlobStore, FilesystemStore};

pub const OWNER: &str = "owner@example.com";

/// Blob store wrapper whose `put` and `delete` can be made to fail on demand
pub struct FlakyStore {
    inner: FilesystemStore,
    fail_put: AtomicBool,
    fail_delete: AtomicBool,
}

impl FlakyStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            inner: FilesystemStore::new(base_path),
            fail_put: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
        }
    }

    pub fn set_fail_put(&self, fail: bool) {
        self.fail_put.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlobStore for FlakyStore {
    async fn put(&self, key: &str, content: Bytes) -> Result<()> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(AppError::Storage("injected put failure".to_string()));
        }
        self.inner.put(key, content).await
    }

    async fn get(&self, key: &str) -> Result<Bytes> {
        self.inner.get(key).await
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        self.inner.exists(key).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(AppError::Storage("injected delete failure".to_string()));
        }
        self.inner.delete(key).await
    }
}

/// Test context containing the core services over a temp directory
pub struct TestContext {
    pub registry: Arc<FileRegistry>,
    pub admins: Arc<AdminRegistry>,
    pub store: Arc<FlakyStore>,
    pub temp: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let store = Arc::new(FlakyStore::new(temp.path().join("blobs")));
        let registry = Arc::new(FileRegistry::new(store.clone()));
        let admins = Arc::new(AdminRegistry::new(OWNER));
        Self {
            registry,
            admins,
            store,
            temp,
        }
    }
}

/// Build a config suitable for router tests
pub fn test_config(mode: CredentialMode, storage_path: &str) -> Config {
    Config {
        bind_address: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
        storage_path: storage_path.to_string(),
        index_path: None,
        credential_mode: mode,
        secret_length: 32,
        owner_email: OWNER.to_string(),
        max_upload_bytes: 10 * 1024 * 1024,
    }
}

/// Build an application router over a fresh test context
pub fn test_router(mode: CredentialMode) -> (axum::Router, TestContext) {
    let ctx = TestContext::new();
    let config = test_config(mode, &ctx.temp.path().join("blobs").to_string_lossy());
    let state = Arc::new(AppState::new(
        config,
        ctx.registry.clone(),
        ctx.admins.clone(),
    ));
    (routes::create_router(state), ctx)
}

pub const BOUNDARY: &str = "filedrop-test-boundary";

/// Build a multipart upload request for POST /api/v1/files.
///
/// `fields` are plain text parts (credential, uploader, description).
pub fn multipart_upload(file_name: &str, data: &[u8], fields: &[(&str, &str)]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(b"\r\n");
    for (name, value) in fields {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/v1/files")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("Failed to build multipart request")
}

/// Build a JSON request
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build JSON request")
}
