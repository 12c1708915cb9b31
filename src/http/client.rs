//! Low-level HTTP transport — `MarketDataHttp`.
//!
//! Performs one GET per call against the resolved target and classifies the
//! outcome. Returns the JSON body untouched; shape checks happen in the
//! domain conversions.

use std::time::Duration;

use reqwest::Client;

use crate::config::FetchTarget;
use crate::error::HttpError;
use crate::http::{MarketDataSource, UpstreamRequest};

/// reqwest-backed [`MarketDataSource`].
#[derive(Debug, Clone)]
pub struct MarketDataHttp {
    target: FetchTarget,
    client: Client,
}

impl MarketDataHttp {
    pub fn new(target: FetchTarget, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self { target, client })
    }

    pub fn target(&self) -> &FetchTarget {
        &self.target
    }

    async fn do_request(&self, request: UpstreamRequest) -> Result<serde_json::Value, HttpError> {
        let url = request.url(&self.target);
        let query = request.query_for(&self.target);

        tracing::debug!(endpoint = %request.endpoint, "GET {}", url);

        let resp = self.client.get(&url).query(&query).send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<serde_json::Value>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();

        tracing::debug!(status = status_code, endpoint = %request.endpoint, "Upstream rejected request");
        Err(HttpError::from_status(status_code, body_text))
    }
}

impl MarketDataSource for MarketDataHttp {
    async fn execute(&self, request: UpstreamRequest) -> Result<serde_json::Value, HttpError> {
        self.do_request(request).await
    }
}
