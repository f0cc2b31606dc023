//! Fetch orchestration: resolve identifiers, call the listing endpoint,
//! normalize the records.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use gazette_shared::constants::{LISTING_ALL_TIMEOUT_SECS, LISTING_LATEST_TIMEOUT_SECS};
use gazette_shared::{
    extract_identifiers, parse_bulletin, BulletinItem, FallbackIds, IdSource, IdentifierPair,
    Lang, ResolvedIds,
};

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::listing::ListingClient;
use crate::pdftext::PdfTextClient;
use crate::scraper::ScraperClient;

pub struct BulletinFetcher {
    scraper: ScraperClient,
    listing: ListingClient,
    pdf_text: PdfTextClient,
}

impl BulletinFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        Ok(Self {
            scraper: ScraperClient::new(&config.scraper_base)?,
            listing: ListingClient::new(&config.ajax_url)?,
            pdf_text: PdfTextClient::new(&config.pdf_text_base)?,
        })
    }

    /// Resolve the identifier pair for a language, preferring live values.
    ///
    /// The language's bulletin page is scraped once and the identifiers
    /// extracted from its inline scripts. Any failure along the way
    /// (network error, non-success status, nothing extracted) substitutes
    /// the static fallback for the missing half. The result is tagged
    /// [`IdSource::Live`] only when both halves came from the scrape, so
    /// callers can observe which path ran. Scrape failures are absorbed
    /// here and never surfaced. No retry.
    pub async fn resolve_identifiers(&self, lang: Lang, fallback: &FallbackIds) -> ResolvedIds {
        let live = match self.scraper.inline_scripts(lang.bulletin_page_url()).await {
            Ok(scripts) => extract_identifiers(&scripts, lang),
            Err(e) => {
                debug!(lang = %lang, error = %e, "identifier scrape failed");
                IdentifierPair::default()
            }
        };

        let source = if live.module_id.is_some() && live.tab_id.is_some() {
            IdSource::Live
        } else {
            IdSource::Fallback
        };

        ResolvedIds {
            module_id: live
                .module_id
                .unwrap_or_else(|| fallback.module_id.clone()),
            tab_id: live.tab_id.unwrap_or_else(|| fallback.tab_id.clone()),
            source,
        }
    }

    /// Fetch the most recent bulletin, or `None` when the listing is empty
    /// or not a well-formed collection.
    ///
    /// "Most recent" means index zero of the upstream's returned order; no
    /// sorting is applied on this side.
    pub async fn fetch_latest(
        &self,
        lang: Lang,
        fallback: &FallbackIds,
    ) -> Result<Option<BulletinItem>, FetchError> {
        let timeout = Duration::from_secs(LISTING_LATEST_TIMEOUT_SECS);
        let records = self.listing_records(lang, fallback, timeout).await?;
        Ok(records.and_then(|r| r.first().map(parse_bulletin)))
    }

    /// Fetch every bulletin in upstream order, or `None` when the response
    /// is not a well-formed collection.
    pub async fn fetch_all(
        &self,
        lang: Lang,
        fallback: &FallbackIds,
    ) -> Result<Option<Vec<BulletinItem>>, FetchError> {
        let timeout = Duration::from_secs(LISTING_ALL_TIMEOUT_SECS);
        let records = self.listing_records(lang, fallback, timeout).await?;
        Ok(records.map(|r| r.iter().map(parse_bulletin).collect()))
    }

    /// Extract the full text of a bulletin document.
    pub async fn extract_text(&self, pdf_url: &str) -> Result<String, FetchError> {
        self.pdf_text.extract(pdf_url).await
    }

    /// One sequential pass: resolve identifiers, then a single listing
    /// call. A payload that is not a collection maps to `None` rather than
    /// an error; everything else propagates.
    async fn listing_records(
        &self,
        lang: Lang,
        fallback: &FallbackIds,
        timeout: Duration,
    ) -> Result<Option<Vec<Value>>, FetchError> {
        let ids = self.resolve_identifiers(lang, fallback).await;
        info!(
            lang = %lang,
            module_id = %ids.module_id,
            tab_id = %ids.tab_id,
            source = ?ids.source,
            "fetching bulletin listing"
        );

        match self.listing.fetch(&ids.module_id, &ids.tab_id, timeout).await {
            Ok(records) => Ok(Some(records)),
            Err(FetchError::UnexpectedPayload(msg)) => {
                debug!(lang = %lang, %msg, "listing payload was not a collection");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use std::collections::HashMap;

    const SCRIPTS: &str = "ModuleId = 5; ModuleId = 9; var TabId = 42;";

    fn fallback() -> FallbackIds {
        FallbackIds::new("2873", "775")
    }

    /// Bind a stub collaborator on an ephemeral port and return its base URL.
    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn scraper_stub(scripts: &'static str) -> Router {
        Router::new().route(
            "/scrape",
            get(move |Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("type").map(String::as_str), Some("scripts"));
                Json(serde_json::json!({ "result": scripts }))
            }),
        )
    }

    fn failing_scraper_stub() -> Router {
        Router::new().route(
            "/scrape",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
    }

    fn listing_stub(body: serde_json::Value) -> Router {
        Router::new().route(
            "/ajax",
            get(move |headers: axum::http::HeaderMap| async move {
                assert!(headers.contains_key("ModuleId"));
                assert!(headers.contains_key("TabId"));
                assert!(headers.contains_key("RequestVerificationToken"));
                Json(body)
            }),
        )
    }

    async fn fetcher(scraper: Router, listing: Router) -> BulletinFetcher {
        let scraper_base = spawn_stub(scraper).await;
        let listing_base = spawn_stub(listing).await;
        let mut config = FetchConfig::new(&scraper_base, "http://127.0.0.1:9");
        config.ajax_url = format!("{listing_base}/ajax");
        BulletinFetcher::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_resolver_live_path() {
        let f = fetcher(scraper_stub(SCRIPTS), listing_stub(serde_json::json!([]))).await;
        let ids = f.resolve_identifiers(Lang::Fr, &fallback()).await;
        assert_eq!(ids.source, IdSource::Live);
        assert_eq!(ids.module_id, "5");
        assert_eq!(ids.tab_id, "42");
    }

    #[tokio::test]
    async fn test_resolver_language_tie_break() {
        let f = fetcher(scraper_stub(SCRIPTS), listing_stub(serde_json::json!([]))).await;
        let ids = f.resolve_identifiers(Lang::Ar, &FallbackIds::new("3111", "847")).await;
        assert_eq!(ids.module_id, "9");
    }

    #[tokio::test]
    async fn test_resolver_falls_back_on_scraper_failure() {
        let f = fetcher(failing_scraper_stub(), listing_stub(serde_json::json!([]))).await;
        let ids = f.resolve_identifiers(Lang::Fr, &fallback()).await;
        assert_eq!(ids.source, IdSource::Fallback);
        assert_eq!(ids.module_id, "2873");
        assert_eq!(ids.tab_id, "775");
    }

    #[tokio::test]
    async fn test_resolver_substitutes_missing_half_only() {
        let f = fetcher(
            scraper_stub("ModuleId = 5;"),
            listing_stub(serde_json::json!([])),
        )
        .await;
        let ids = f.resolve_identifiers(Lang::Fr, &fallback()).await;
        assert_eq!(ids.source, IdSource::Fallback);
        assert_eq!(ids.module_id, "5");
        assert_eq!(ids.tab_id, "775");
    }

    #[tokio::test]
    async fn test_fetch_latest_survives_dead_scraper() {
        // End to end: the scrape fails, the listing still answers through
        // the fallback identifiers.
        let listing = listing_stub(serde_json::json!([
            {
                "BoId": 4521,
                "BoNum": "7210",
                "BoDate": "/Date(1687392000000)/",
                "BoUrl": "/BO/fr/2023/BO_7210.pdf"
            },
            { "BoId": 4520, "BoNum": "7209" }
        ]));
        let f = fetcher(failing_scraper_stub(), listing).await;

        let item = f.fetch_latest(Lang::Fr, &fallback()).await.unwrap().unwrap();
        assert_eq!(item.id, Some(4521));
        assert_eq!(item.date.as_deref(), Some("2023-06-22T00:00:00Z"));
        assert_eq!(
            item.document_url,
            "https://www.sgg.gov.ma/BO/fr/2023/BO_7210.pdf"
        );
    }

    #[tokio::test]
    async fn test_fetch_latest_empty_listing_is_absent() {
        let f = fetcher(failing_scraper_stub(), listing_stub(serde_json::json!([]))).await;
        let item = f.fetch_latest(Lang::Fr, &fallback()).await.unwrap();
        assert!(item.is_none());
    }

    #[tokio::test]
    async fn test_non_array_listing_is_absent() {
        let f = fetcher(
            failing_scraper_stub(),
            listing_stub(serde_json::json!({ "error": "maintenance" })),
        )
        .await;
        assert!(f.fetch_latest(Lang::Fr, &fallback()).await.unwrap().is_none());
        assert!(f.fetch_all(Lang::Fr, &fallback()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fetch_all_preserves_upstream_order() {
        let listing = listing_stub(serde_json::json!([
            { "BoNum": "7210" },
            { "BoNum": "7209" },
            { "BoNum": "7208" }
        ]));
        let f = fetcher(failing_scraper_stub(), listing).await;

        let items = f.fetch_all(Lang::Fr, &fallback()).await.unwrap().unwrap();
        let numbers: Vec<_> = items
            .iter()
            .map(|i| i.number.as_ref().unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(numbers, ["7210", "7209", "7208"]);
    }

    #[tokio::test]
    async fn test_listing_error_status_propagates() {
        let listing = Router::new().route(
            "/ajax",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let f = fetcher(failing_scraper_stub(), listing).await;

        let err = f.fetch_latest(Lang::Fr, &fallback()).await.unwrap_err();
        match err {
            FetchError::Status { status, .. } => assert_eq!(status, 503),
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
