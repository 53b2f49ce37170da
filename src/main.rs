mod config;
mod metrics;
mod models;
mod routes;
mod services;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::{
    http::ReqwestFetcher, resolver::SourceResolver, upload_store::UploadStore,
};

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub resolver: SourceResolver,
    pub uploads: UploadStore,
    pub start_time: Instant,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iptv_resolver=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = Config::from_env();
    let port = config.port;

    tracing::info!("Starting IPTV Resolver v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.environment);

    // One shared HTTP client for playlists and account APIs
    let http = Arc::new(ReqwestFetcher::new(&config)?);
    tracing::info!(
        "HTTP client initialized (timeout {}ms, max playlist {}MB)",
        config.fetch_timeout_ms,
        config.max_playlist_size_mb
    );

    let resolver = SourceResolver::new(http, config.folder_scan_max_depth);
    let uploads = UploadStore::new(config.upload_max_entries);
    tracing::info!("Upload store initialized ({} entries max)", config.upload_max_entries);

    // Build application state
    let state = Arc::new(AppState {
        config,
        resolver,
        uploads,
        start_time: Instant::now(),
    });

    let app = routes::router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
