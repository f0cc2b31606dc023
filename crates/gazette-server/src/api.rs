use std::sync::Arc;

use axum::http::Method;
use axum::response::Html;
use axum::routing::get;
use axum::{extract::State, middleware, Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use gazette_fetch::BulletinFetcher;
use gazette_shared::{BulletinItem, Lang};

use crate::auth::require_api_token;
use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::snapshot::Snapshot;

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<BulletinFetcher>,
    pub config: Arc<ServerConfig>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    // Bulletin routes sit behind the (optional) token guard; the index
    // page and health probe stay open.
    let bulletin_routes = Router::new()
        .route("/api/BO/FR", get(bo_latest_fr))
        .route("/api/BO/AR", get(bo_latest_ar))
        .route("/api/BO/ALL/FR", get(bo_all_fr))
        .route("/api/BO/ALL/AR", get(bo_all_ar))
        .route("/api/BO/Text/FR", get(bo_text_fr))
        .route("/api/BO/Text/AR", get(bo_text_ar))
        .route("/api/BO/Cache/FR", get(bo_cache_fr))
        .route("/api/BO/Cache/AR", get(bo_cache_ar))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_token,
        ));

    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health_check))
        .merge(bulletin_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct TextResponse {
    text: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>Bulletin Officiel API</title></head>
<body style="font-family: Arial; padding: 24px; max-width: 960px; margin: auto;">
  <h1>Bulletin Officiel API</h1>
  <p>Endpoints:</p>
  <ul>
    <li>GET <code>/api/BO/FR</code></li>
    <li>GET <code>/api/BO/ALL/FR</code></li>
    <li>GET <code>/api/BO/Text/FR</code></li>
    <li>GET <code>/api/BO/Cache/FR</code></li>
    <li>GET <code>/api/BO/AR</code></li>
    <li>GET <code>/api/BO/ALL/AR</code></li>
    <li>GET <code>/api/BO/Text/AR</code></li>
    <li>GET <code>/api/BO/Cache/AR</code></li>
    <li>GET <code>/api/health</code></li>
  </ul>
  <p>Set env <code>SCRAPER_API_BASE</code> and <code>PDF2TEXT_BASE</code> to override defaults.</p>
</body></html>
"#;

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// ─── Bulletin handlers ───

fn latest_not_found() -> ApiError {
    ApiError::NotFound("Latest Bulletin Officiel not found".to_string())
}

fn all_not_found(lang: Lang) -> ApiError {
    let message = match lang {
        Lang::Fr => "No French Bulletin Officiel was found",
        Lang::Ar => "No Arabic Bulletin Officiel was found",
    };
    ApiError::NotFound(message.to_string())
}

/// Latest bulletin for a language. An upstream failure is reported the
/// same way as a genuinely empty listing: 404.
async fn bo_latest(state: AppState, lang: Lang) -> Result<Json<BulletinItem>, ApiError> {
    let item = state
        .fetcher
        .fetch_latest(lang, state.config.fallback_for(lang))
        .await
        .map_err(|e| {
            warn!(lang = %lang, error = %e, "latest bulletin fetch failed");
            latest_not_found()
        })?
        .ok_or_else(latest_not_found)?;

    Ok(Json(item))
}

async fn bo_all(state: AppState, lang: Lang) -> Result<Json<Vec<BulletinItem>>, ApiError> {
    let items = state
        .fetcher
        .fetch_all(lang, state.config.fallback_for(lang))
        .await
        .map_err(|e| {
            warn!(lang = %lang, error = %e, "bulletin listing fetch failed");
            all_not_found(lang)
        })?
        .ok_or_else(|| all_not_found(lang))?;

    if items.is_empty() {
        return Err(all_not_found(lang));
    }

    Ok(Json(items))
}

/// Full text of the latest bulletin's document.
async fn bo_text(state: AppState, lang: Lang) -> Result<Json<TextResponse>, ApiError> {
    let item = state
        .fetcher
        .fetch_latest(lang, state.config.fallback_for(lang))
        .await
        .map_err(|e| {
            warn!(lang = %lang, error = %e, "latest bulletin fetch failed");
            latest_not_found()
        })?
        .ok_or_else(latest_not_found)?;

    let text_not_found = || ApiError::NotFound("Text content not found".to_string());

    if item.document_url.is_empty() {
        return Err(text_not_found());
    }

    let text = state
        .fetcher
        .extract_text(&item.document_url)
        .await
        .map_err(|e| {
            warn!(lang = %lang, error = %e, "PDF text extraction failed");
            text_not_found()
        })?;

    if text.is_empty() {
        return Err(text_not_found());
    }

    info!(lang = %lang, chars = text.len(), "served bulletin text");
    Ok(Json(TextResponse { text }))
}

/// The locally snapshotted listing for a language. The snapshot file is
/// maintained by an external process and read fresh on every request.
async fn bo_cache(state: AppState, lang: Lang) -> Result<Json<Vec<BulletinItem>>, ApiError> {
    let Some(path) = state.config.snapshot_path.as_deref() else {
        return Err(ApiError::NotFound("No local snapshot configured".to_string()));
    };

    let snapshot = Snapshot::load(path).await?;
    let items = snapshot
        .bulletins(lang)
        .filter(|items| !items.is_empty())
        .ok_or_else(|| all_not_found(lang))?;

    Ok(Json(items))
}

async fn bo_latest_fr(State(state): State<AppState>) -> Result<Json<BulletinItem>, ApiError> {
    bo_latest(state, Lang::Fr).await
}

async fn bo_latest_ar(State(state): State<AppState>) -> Result<Json<BulletinItem>, ApiError> {
    bo_latest(state, Lang::Ar).await
}

async fn bo_all_fr(State(state): State<AppState>) -> Result<Json<Vec<BulletinItem>>, ApiError> {
    bo_all(state, Lang::Fr).await
}

async fn bo_all_ar(State(state): State<AppState>) -> Result<Json<Vec<BulletinItem>>, ApiError> {
    bo_all(state, Lang::Ar).await
}

async fn bo_text_fr(State(state): State<AppState>) -> Result<Json<TextResponse>, ApiError> {
    bo_text(state, Lang::Fr).await
}

async fn bo_text_ar(State(state): State<AppState>) -> Result<Json<TextResponse>, ApiError> {
    bo_text(state, Lang::Ar).await
}

async fn bo_cache_fr(State(state): State<AppState>) -> Result<Json<Vec<BulletinItem>>, ApiError> {
    bo_cache(state, Lang::Fr).await
}

async fn bo_cache_ar(State(state): State<AppState>) -> Result<Json<Vec<BulletinItem>>, ApiError> {
    bo_cache(state, Lang::Ar).await
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
