//! Quotes sub-client — live price snapshots.

use super::wire::SimplePriceResponse;
use super::{quotes_from_wire, Quote};
use crate::client::MarketClient;
use crate::error::HttpError;
use crate::http::{Endpoint, FetchParams, MarketDataSource};
use crate::shared::AssetId;
use std::collections::HashMap;

/// Sub-client for current quotes.
pub struct Quotes<'a, S> {
    pub(crate) client: &'a MarketClient<S>,
}

impl<'a, S: MarketDataSource> Quotes<'a, S> {
    /// Current USD quote with 24h change, volume and market cap per asset.
    /// Assets the upstream does not know are simply absent from the result.
    pub async fn snapshot(&self, ids: &[AssetId]) -> Result<HashMap<AssetId, Quote>, HttpError> {
        let body = self
            .client
            .fetch_market_data(Endpoint::Prices, FetchParams::for_assets(ids))
            .await?;
        let resp: SimplePriceResponse = serde_json::from_value(body)?;
        Ok(quotes_from_wire(resp))
    }
}
