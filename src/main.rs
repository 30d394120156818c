//! Filedrop - Main Entry Point

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use filedrop::{
    api,
    config::Config,
    error::Result,
    services::{admin_service::AdminRegistry, registry_service::FileRegistry},
    storage::FilesystemStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "filedrop=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Starting Filedrop");

    // Blob store
    tokio::fs::create_dir_all(&config.storage_path).await?;
    let store = Arc::new(FilesystemStore::new(&config.storage_path));
    let swept = store.sweep_partial().await?;
    if swept > 0 {
        tracing::info!(count = swept, "Swept orphaned partial blobs");
    }

    // File registry, reconciled against the blob store
    let registry = Arc::new(FileRegistry::load(store, config.index_path.clone()).await?);
    match &config.index_path {
        Some(path) => tracing::info!(index = %path.display(), "Index persistence enabled"),
        None => tracing::info!("Index persistence disabled, registry is memory-only"),
    }

    // Admin allow-list, seeded with the owner
    let admins = Arc::new(AdminRegistry::new(&config.owner_email));
    tracing::info!(owner = %admins.owner(), "Admin registry initialized");

    // Build router
    let state = Arc::new(api::AppState::new(config.clone(), registry, admins));
    let app = api::routes::create_router(state);

    // Start server
    let addr: SocketAddr = config.bind_address.parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
