//! Client for the page-scraping collaborator.
//!
//! The collaborator fetches a target page server-side and returns the
//! concatenated inline script text, which is where the upstream site
//! embeds its routing identifiers.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use gazette_shared::constants::SCRAPE_TIMEOUT_SECS;

use crate::error::FetchError;

pub struct ScraperClient {
    http: reqwest::Client,
    base_url: String,
}

impl ScraperClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(SCRAPE_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the concatenated inline script text of `page_url`.
    ///
    /// A response without a string `result` degrades to an empty string;
    /// the caller's extraction then finds nothing and falls back.
    pub async fn inline_scripts(&self, page_url: &str) -> Result<String, FetchError> {
        let url = format!("{}/scrape", self.base_url);

        let resp = self
            .http
            .get(&url)
            .query(&[("url", page_url), ("type", "scripts")])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = resp.json().await?;
        let scripts = match body.get("result") {
            Some(Value::String(s)) => s.clone(),
            Some(v) if !v.is_null() => v.to_string(),
            _ => String::new(),
        };

        debug!(page = page_url, bytes = scripts.len(), "scraped inline scripts");
        Ok(scripts)
    }
}
