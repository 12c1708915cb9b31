//! Endpoint descriptors and query normalization.

use crate::config::{FetchTarget, DEFAULT_CURRENCY, DEFAULT_MARKET_ORDER};
use crate::network::{PROXY_HISTORY_PATH, PROXY_MARKETS_PATH, PROXY_PRICES_PATH};
use crate::shared::{join_ids, AssetId, Interval};

/// The three upstream resources the pipeline reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Current quotes for a list of assets.
    Prices,
    /// Market metadata (symbol, image) for a list of assets.
    Markets,
    /// Price history for one asset.
    Historical,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prices => "prices",
            Self::Markets => "markets",
            Self::Historical => "historical",
        }
    }

    /// Resource path for the given target. Direct history requests carry the
    /// asset in the path; the proxy takes it as a query parameter instead.
    pub fn path(&self, target: &FetchTarget, asset: Option<&AssetId>) -> String {
        match (target, self) {
            (FetchTarget::Proxy { .. }, Self::Prices) => PROXY_PRICES_PATH.to_string(),
            (FetchTarget::Proxy { .. }, Self::Markets) => PROXY_MARKETS_PATH.to_string(),
            (FetchTarget::Proxy { .. }, Self::Historical) => PROXY_HISTORY_PATH.to_string(),
            (FetchTarget::Direct { .. }, Self::Prices) => "/simple/price".to_string(),
            (FetchTarget::Direct { .. }, Self::Markets) => "/coins/markets".to_string(),
            (FetchTarget::Direct { .. }, Self::Historical) => format!(
                "/coins/{}/market_chart",
                asset.map(AssetId::as_str).unwrap_or_default()
            ),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Variable parts of a request. Anything left `None` gets its documented default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchParams {
    pub ids: Vec<AssetId>,
    pub currency: Option<String>,
    pub days: Option<u32>,
    pub interval: Option<Interval>,
    pub order: Option<String>,
    pub include_24hr_change: Option<bool>,
    pub include_24hr_vol: Option<bool>,
    pub include_market_cap: Option<bool>,
}

impl FetchParams {
    pub fn for_assets(ids: &[AssetId]) -> Self {
        Self {
            ids: ids.to_vec(),
            ..Self::default()
        }
    }

    pub fn for_asset(id: &AssetId) -> Self {
        Self::for_assets(std::slice::from_ref(id))
    }

    pub fn days(mut self, days: u32) -> Self {
        self.days = Some(days);
        self
    }

    pub fn interval(mut self, interval: Interval) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn currency(mut self, currency: &str) -> Self {
        self.currency = Some(currency.to_string());
        self
    }

    /// Normalize into a concrete request for `endpoint`.
    ///
    /// Sparkline generation is always disabled: it inflates market responses
    /// and is the usual trigger for CORS failures.
    pub fn into_request(self, endpoint: Endpoint) -> UpstreamRequest {
        let currency = self
            .currency
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        let flag = |v: Option<bool>| v.unwrap_or(true).to_string();

        match endpoint {
            Endpoint::Prices => UpstreamRequest::new(
                endpoint,
                None,
                vec![
                    ("ids", join_ids(&self.ids)),
                    ("vs_currencies", currency),
                    ("include_24hr_change", flag(self.include_24hr_change)),
                    ("include_24hr_vol", flag(self.include_24hr_vol)),
                    ("include_market_cap", flag(self.include_market_cap)),
                ],
            ),
            Endpoint::Markets => UpstreamRequest::new(
                endpoint,
                None,
                vec![
                    ("vs_currency", currency),
                    ("ids", join_ids(&self.ids)),
                    (
                        "order",
                        self.order
                            .unwrap_or_else(|| DEFAULT_MARKET_ORDER.to_string()),
                    ),
                    ("sparkline", "false".to_string()),
                ],
            ),
            Endpoint::Historical => UpstreamRequest::new(
                endpoint,
                self.ids.into_iter().next(),
                vec![
                    ("vs_currency", currency),
                    ("days", self.days.unwrap_or(1).to_string()),
                    (
                        "interval",
                        self.interval.unwrap_or(Interval::Daily).to_string(),
                    ),
                ],
            ),
        }
    }
}

/// A fully normalized GET: endpoint, optional path asset, query pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub endpoint: Endpoint,
    pub asset: Option<AssetId>,
    pub query: Vec<(&'static str, String)>,
}

impl UpstreamRequest {
    pub fn new(
        endpoint: Endpoint,
        asset: Option<AssetId>,
        query: Vec<(&'static str, String)>,
    ) -> Self {
        Self {
            endpoint,
            asset,
            query,
        }
    }

    /// Value of a query parameter, if present.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Overwrite a query parameter in place, appending it if absent.
    pub fn set_param(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.query.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.query.push((name, value)),
        }
    }

    /// Absolute URL (without query string) on `target`.
    pub fn url(&self, target: &FetchTarget) -> String {
        format!(
            "{}{}",
            target.base_url(),
            self.endpoint.path(target, self.asset.as_ref())
        )
    }

    /// Query pairs as sent on `target`. The proxy receives the asset as `id`.
    pub fn query_for(&self, target: &FetchTarget) -> Vec<(&'static str, String)> {
        let mut query = self.query.clone();
        if let (FetchTarget::Proxy { .. }, Some(asset)) = (target, &self.asset) {
            query.insert(0, ("id", asset.to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> Vec<AssetId> {
        vec![AssetId::from("bitcoin"), AssetId::from("ethereum")]
    }

    #[test]
    fn test_prices_defaults() {
        let req = FetchParams::for_assets(&ids()).into_request(Endpoint::Prices);
        assert_eq!(req.param("ids"), Some("bitcoin,ethereum"));
        assert_eq!(req.param("vs_currencies"), Some("usd"));
        assert_eq!(req.param("include_24hr_change"), Some("true"));
        assert_eq!(req.param("include_24hr_vol"), Some("true"));
        assert_eq!(req.param("include_market_cap"), Some("true"));
        assert!(req.asset.is_none());
    }

    #[test]
    fn test_markets_defaults_disable_sparkline() {
        let req = FetchParams::for_assets(&ids()).into_request(Endpoint::Markets);
        assert_eq!(req.param("vs_currency"), Some("usd"));
        assert_eq!(req.param("order"), Some("market_cap_desc"));
        assert_eq!(req.param("sparkline"), Some("false"));
    }

    #[test]
    fn test_historical_carries_asset_and_window() {
        let req = FetchParams::for_asset(&AssetId::from("solana"))
            .days(1)
            .interval(Interval::Hourly)
            .currency("eur")
            .into_request(Endpoint::Historical);
        assert_eq!(req.asset, Some(AssetId::from("solana")));
        assert_eq!(req.param("days"), Some("1"));
        assert_eq!(req.param("interval"), Some("hourly"));
        assert_eq!(req.param("vs_currency"), Some("eur"));
    }

    #[test]
    fn test_historical_defaults() {
        let req = FetchParams::for_asset(&AssetId::from("solana")).into_request(Endpoint::Historical);
        assert_eq!(req.param("days"), Some("1"));
        assert_eq!(req.param("interval"), Some("daily"));
    }

    #[test]
    fn test_urls_per_target() {
        let direct = FetchTarget::direct("https://api.example.com/api/v3");
        let proxy = FetchTarget::proxy("http://localhost:3000");
        let req = FetchParams::for_asset(&AssetId::from("bitcoin"))
            .days(7)
            .into_request(Endpoint::Historical);

        assert_eq!(
            req.url(&direct),
            "https://api.example.com/api/v3/coins/bitcoin/market_chart"
        );
        assert_eq!(req.url(&proxy), "http://localhost:3000/api/coingecko-history");
        assert!(req.query_for(&direct).iter().all(|(k, _)| *k != "id"));
        assert_eq!(req.query_for(&proxy)[0], ("id", "bitcoin".to_string()));
    }

    #[test]
    fn test_set_param_keeps_position() {
        let mut req = FetchParams::for_asset(&AssetId::from("bitcoin")).into_request(Endpoint::Historical);
        req.set_param("days", "max");
        req.set_param("precision", "2");

        assert_eq!(req.param("days"), Some("max"));
        assert_eq!(req.query[1], ("days", "max".to_string()));
        assert_eq!(req.query.last(), Some(&("precision", "2".to_string())));
    }

    #[test]
    fn test_prices_and_markets_paths() {
        let direct = FetchTarget::direct("https://api.example.com");
        let proxy = FetchTarget::proxy("http://localhost:3000");
        assert_eq!(Endpoint::Prices.path(&direct, None), "/simple/price");
        assert_eq!(Endpoint::Markets.path(&direct, None), "/coins/markets");
        assert_eq!(Endpoint::Prices.path(&proxy, None), "/api/coingecko-prices");
        assert_eq!(Endpoint::Markets.path(&proxy, None), "/api/coingecko-markets");
    }
}
