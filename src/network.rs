//! Network URL constants.

/// Upstream market-data REST API.
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.coingecko.com/api/v3";

/// Default base URL of a locally running `cryptolive-proxy`.
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:3000";

/// Proxy route for the prices endpoint.
pub const PROXY_PRICES_PATH: &str = "/api/coingecko-prices";

/// Proxy route for the markets endpoint.
pub const PROXY_MARKETS_PATH: &str = "/api/coingecko-markets";

/// Proxy route for the historical endpoint.
pub const PROXY_HISTORY_PATH: &str = "/api/coingecko-history";
