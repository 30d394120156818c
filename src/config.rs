//! Application configuration loaded from environment variables.

use crate::error::{AppError, Result};
use std::env;
use std::path::PathBuf;

/// Which credential format uploads must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialMode {
    /// Free-form high-entropy download secret; generated server-side when
    /// the uploader does not supply one.
    Secret,
    /// 4-digit numeric PIN, always supplied by the uploader.
    Pin,
}

impl CredentialMode {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "secret" => Ok(Self::Secret),
            "pin" => Ok(Self::Pin),
            other => Err(AppError::Config(format!(
                "Unknown CREDENTIAL_MODE: {} (expected \"secret\" or \"pin\")",
                other
            ))),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (host:port)
    pub bind_address: String,

    /// Log level
    pub log_level: String,

    /// Filesystem blob storage path
    pub storage_path: String,

    /// Path of the write-through JSON index; None disables persistence
    pub index_path: Option<PathBuf>,

    /// Credential format for uploads
    pub credential_mode: CredentialMode,

    /// Length of server-generated download secrets
    pub secret_length: usize,

    /// Owner identity; the only identity allowed to grant admin status
    pub owner_email: String,

    /// Maximum accepted upload body size in bytes
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            storage_path: env::var("STORAGE_PATH")
                .unwrap_or_else(|_| "/var/lib/filedrop/blobs".into()),
            index_path: env::var("INDEX_PATH").ok().map(PathBuf::from),
            credential_mode: CredentialMode::parse(
                &env::var("CREDENTIAL_MODE").unwrap_or_else(|_| "secret".into()),
            )?,
            secret_length: env::var("SECRET_LENGTH")
                .unwrap_or_else(|_| "32".into())
                .parse()
                .unwrap_or(32),
            owner_email: env::var("OWNER_EMAIL")
                .map_err(|_| AppError::Config("OWNER_EMAIL not set".into()))?,
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| "524288000".into())
                .parse()
                .unwrap_or(500 * 1024 * 1024),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_mode_parse() {
        assert_eq!(CredentialMode::parse("secret").unwrap(), CredentialMode::Secret);
        assert_eq!(CredentialMode::parse("pin").unwrap(), CredentialMode::Pin);
        assert!(CredentialMode::parse("both").is_err());
    }
}
