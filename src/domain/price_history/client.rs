//! Price history sub-client — single-asset series and the sequential
//! historical aggregator.

use super::wire::MarketChartResponse;
use super::{series_from_wire, HistoricalBatch, PricePoint};
use crate::client::MarketClient;
use crate::error::HttpError;
use crate::http::{Endpoint, FetchParams, MarketDataSource};
use crate::shared::fmt::Granularity;
use crate::shared::{AssetId, Window};
use std::collections::HashMap;

/// Sub-client for historical price series.
pub struct PriceHistory<'a, S> {
    pub(crate) client: &'a MarketClient<S>,
}

impl<'a, S: MarketDataSource> PriceHistory<'a, S> {
    /// One asset's series for `window`.
    pub async fn series(&self, id: &AssetId, window: Window) -> Result<Vec<PricePoint>, HttpError> {
        let params = FetchParams::for_asset(id)
            .days(window.days)
            .interval(window.interval);
        let body = self
            .client
            .fetch_market_data(Endpoint::Historical, params)
            .await?;
        let resp: MarketChartResponse = serde_json::from_value(body)?;
        Ok(series_from_wire(resp, Granularity::for_window(window.days)))
    }

    /// Fetch every asset's series for a `days` window, strictly in order.
    ///
    /// Consecutive requests are separated by the configured request delay.
    /// A rate limit or network block aborts the whole batch and is returned
    /// as-is; any other failure records `None` for that asset and moves on.
    pub async fn fetch_all(&self, ids: &[AssetId], days: u32) -> Result<HistoricalBatch, HttpError> {
        let window = Window::new(days);
        let delay = self.client.config.request_delay;
        let mut batch: HistoricalBatch = HashMap::with_capacity(ids.len());

        for (i, id) in ids.iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match self.series(id, window).await {
                Ok(points) => {
                    tracing::debug!(asset = %id, points = points.len(), "historical series loaded");
                    batch.insert(id.clone(), Some(points));
                }
                Err(e) if e.is_systemic() => {
                    tracing::warn!(asset = %id, kind = %e.kind(), "aborting historical batch: {e}");
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!(asset = %id, "historical fetch failed: {e}");
                    batch.insert(id.clone(), None);
                }
            }
        }

        Ok(batch)
    }
}
