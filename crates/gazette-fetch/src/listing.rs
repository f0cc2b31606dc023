//! Client for the upstream AJAX listing endpoint.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::error::FetchError;

pub struct ListingClient {
    http: reqwest::Client,
    ajax_url: String,
}

impl ListingClient {
    pub fn new(ajax_url: &str) -> Result<Self, FetchError> {
        // No client-level timeout: the two call sites use different
        // per-request deadlines (latest vs full listing).
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            ajax_url: ajax_url.to_string(),
        })
    }

    /// Fetch the raw listing records for an identifier pair.
    ///
    /// The identifiers travel as request headers; the endpoint also expects
    /// an empty `RequestVerificationToken` header. Records are returned
    /// unparsed, in upstream order.
    pub async fn fetch(
        &self,
        module_id: &str,
        tab_id: &str,
        timeout: Duration,
    ) -> Result<Vec<Value>, FetchError> {
        let resp = self
            .http
            .get(&self.ajax_url)
            .header("ModuleId", module_id)
            .header("TabId", tab_id)
            .header("RequestVerificationToken", "")
            .timeout(timeout)
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
        match body {
            Value::Array(records) => {
                debug!(count = records.len(), "fetched bulletin listing");
                Ok(records)
            }
            _ => Err(FetchError::UnexpectedPayload(
                "listing response is not a JSON array".to_string(),
            )),
        }
    }
}
