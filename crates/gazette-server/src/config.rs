//! Server configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the server can start with zero
//! configuration for local development.

use std::net::SocketAddr;
use std::path::PathBuf;

use gazette_shared::constants::{
    AR_FALLBACK_MODULE_ID, AR_FALLBACK_TAB_ID, DEFAULT_HTTP_PORT, DEFAULT_PDF2TEXT_BASE,
    DEFAULT_SCRAPER_BASE, FR_FALLBACK_MODULE_ID, FR_FALLBACK_TAB_ID,
};
use gazette_shared::{FallbackIds, Lang};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) API server.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:8080`
    pub http_addr: SocketAddr,

    /// Base URL of the page-scraping collaborator.
    /// Env: `SCRAPER_API_BASE`
    pub scraper_base: String,

    /// Base URL of the PDF-to-text collaborator.
    /// Env: `PDF2TEXT_BASE`
    pub pdf_text_base: String,

    /// Path to the flat-file listing snapshot, if one is maintained.
    /// Env: `SNAPSHOT_PATH`
    /// Default: unset (snapshot endpoints answer 404).
    pub snapshot_path: Option<PathBuf>,

    /// Static API bearer token. Required on `/api/BO/*` when set.
    /// Env: `API_TOKEN`
    /// Default: empty (no token check).
    pub api_token: Option<String>,

    /// Static fallback identifiers for the French listing.
    /// Env: `FR_MODULE_ID` / `FR_TAB_ID`
    pub fr_fallback: FallbackIds,

    /// Static fallback identifiers for the Arabic listing.
    /// Env: `AR_MODULE_ID` / `AR_TAB_ID`
    pub ar_fallback: FallbackIds,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], DEFAULT_HTTP_PORT).into(),
            scraper_base: DEFAULT_SCRAPER_BASE.to_string(),
            pdf_text_base: DEFAULT_PDF2TEXT_BASE.to_string(),
            snapshot_path: None,
            api_token: None,
            fr_fallback: FallbackIds::new(FR_FALLBACK_MODULE_ID, FR_FALLBACK_TAB_ID),
            ar_fallback: FallbackIds::new(AR_FALLBACK_MODULE_ID, AR_FALLBACK_TAB_ID),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(value = %addr, "Invalid HTTP_ADDR, using default");
            }
        }

        if let Ok(base) = std::env::var("SCRAPER_API_BASE") {
            config.scraper_base = base;
        }

        if let Ok(base) = std::env::var("PDF2TEXT_BASE") {
            config.pdf_text_base = base;
        }

        if let Ok(path) = std::env::var("SNAPSHOT_PATH") {
            if !path.is_empty() {
                config.snapshot_path = Some(PathBuf::from(path));
            }
        }

        if let Ok(token) = std::env::var("API_TOKEN") {
            if !token.is_empty() {
                config.api_token = Some(token);
            }
        }

        if let Ok(id) = std::env::var("FR_MODULE_ID") {
            config.fr_fallback.module_id = id;
        }
        if let Ok(id) = std::env::var("FR_TAB_ID") {
            config.fr_fallback.tab_id = id;
        }
        if let Ok(id) = std::env::var("AR_MODULE_ID") {
            config.ar_fallback.module_id = id;
        }
        if let Ok(id) = std::env::var("AR_TAB_ID") {
            config.ar_fallback.tab_id = id;
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }

    /// The static fallback identifier pair for a language.
    pub fn fallback_for(&self, lang: Lang) -> &FallbackIds {
        match lang {
            Lang::Fr => &self.fr_fallback,
            Lang::Ar => &self.ar_fallback,
        }
    }
}
