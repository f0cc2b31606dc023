//! Client for the PDF-to-text collaborator.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use gazette_shared::constants::PDF_TEXT_TIMEOUT_SECS;

use crate::error::FetchError;

pub struct PdfTextClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct TextExtractionResponse {
    #[serde(default)]
    text: Option<String>,
}

impl PdfTextClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        // Generous timeout: the collaborator downloads and extracts the
        // whole document before answering.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(PDF_TEXT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Extract the full text of the PDF at `pdf_url`, trimmed.
    pub async fn extract(&self, pdf_url: &str) -> Result<String, FetchError> {
        let url = format!("{}/api/pdf-text-all", self.base_url);

        let resp = self
            .http
            .get(&url)
            .query(&[("pdfUrl", pdf_url)])
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

        let body: TextExtractionResponse = resp.json().await?;
        let text = body.text.unwrap_or_default().trim().to_string();

        debug!(pdf = pdf_url, chars = text.len(), "extracted PDF text");
        Ok(text)
    }
}
