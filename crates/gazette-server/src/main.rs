//! # gazette-server
//!
//! HTTP façade aggregating Bulletin Officiel metadata from the upstream
//! government site.
//!
//! This binary provides:
//! - **REST API** (axum) exposing the latest bulletin, the full listing,
//!   and extracted document text, per language
//! - **Live identifier resolution** via an external page-scraping service,
//!   degrading to static fallback identifiers when the scrape fails
//! - **Flat-file snapshot reads** for locally cached listings
//! - **Optional static bearer-token guard** on the bulletin routes

mod api;
mod auth;
mod config;
mod error;
mod snapshot;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use gazette_fetch::{BulletinFetcher, FetchConfig};

use crate::api::AppState;
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,gazette_server=debug")),
        )
        .init();

    info!("Starting Bulletin Officiel API v{}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::from_env();
    info!(
        http_addr = %config.http_addr,
        scraper_base = %config.scraper_base,
        pdf_text_base = %config.pdf_text_base,
        snapshot_configured = config.snapshot_path.is_some(),
        token_required = config.api_token.is_some(),
        "Loaded configuration"
    );

    let fetch_config = FetchConfig::new(&config.scraper_base, &config.pdf_text_base);
    let fetcher = Arc::new(BulletinFetcher::new(&fetch_config)?);

    let http_addr = config.http_addr;
    let state = AppState {
        fetcher,
        config: Arc::new(config),
    };

    // tokio::select! ensures that if either the HTTP server or a shutdown
    // signal arrives, we exit cleanly.
    tokio::select! {
        result = api::serve(state, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
