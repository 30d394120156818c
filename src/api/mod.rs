//! API module - HTTP handlers and routes.

pub mod download_response;
pub mod dto;
pub mod handlers;
pub mod routes;

use std::sync::Arc;

use crate::config::Config;
use crate::services::admin_service::AdminRegistry;
use crate::services::registry_service::FileRegistry;
use crate::services::secret_service::SecretGenerator;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub registry: Arc<FileRegistry>,
    pub admins: Arc<AdminRegistry>,
    /// Generator for server-issued download secrets
    pub secrets: SecretGenerator,
}

impl AppState {
    pub fn new(config: Config, registry: Arc<FileRegistry>, admins: Arc<AdminRegistry>) -> Self {
        let secrets = SecretGenerator::new(config.secret_length);
        Self {
            config,
            registry,
            admins,
            secrets,
        }
    }
}

pub type SharedState = Arc<AppState>;
