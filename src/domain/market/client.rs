//! Markets sub-client — asset metadata with a TTL cache.

use super::wire::MarketsResponse;
use super::{market_info_from_wire, MarketInfo};
use crate::client::MarketClient;
use crate::error::HttpError;
use crate::http::{Endpoint, FetchParams, MarketDataSource};
use crate::shared::AssetId;
use std::collections::HashMap;
use std::time::Instant;

/// Sub-client for market metadata.
pub struct Markets<'a, S> {
    pub(crate) client: &'a MarketClient<S>,
}

impl<'a, S: MarketDataSource> Markets<'a, S> {
    /// Symbol and logo per asset. Fresh cache entries are served locally; only
    /// the misses go upstream, in one request.
    pub async fn basic_info(
        &self,
        ids: &[AssetId],
    ) -> Result<HashMap<AssetId, MarketInfo>, HttpError> {
        let mut found = HashMap::new();
        let mut missing = Vec::new();

        {
            let cache = self.client.market_cache.read().await;
            for id in ids {
                match cache.get(id) {
                    Some((info, fetched_at))
                        if fetched_at.elapsed() < self.client.market_cache_ttl =>
                    {
                        found.insert(id.clone(), info.clone());
                    }
                    _ => missing.push(id.clone()),
                }
            }
        }

        if missing.is_empty() {
            return Ok(found);
        }

        let body = self
            .client
            .fetch_market_data(Endpoint::Markets, FetchParams::for_assets(&missing))
            .await?;
        let resp: MarketsResponse = serde_json::from_value(body)?;
        let fetched = market_info_from_wire(resp);

        {
            let mut cache = self.client.market_cache.write().await;
            let now = Instant::now();
            for (id, info) in &fetched {
                cache.insert(id.clone(), (info.clone(), now));
            }
        }

        found.extend(fetched);
        Ok(found)
    }

    pub async fn clear_cache(&self) {
        self.client.market_cache.write().await.clear();
    }
}
