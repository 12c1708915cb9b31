//! High-level client — `MarketClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared cache state, and accessor methods.

use crate::config::{Config, FetchTarget};
use crate::domain::market::client::Markets;
use crate::domain::market::MarketInfo;
use crate::domain::price_history::client::PriceHistory;
use crate::domain::quote::client::Quotes;
use crate::error::HttpError;
use crate::http::{Endpoint, FetchParams, MarketDataSource};
use crate::shared::AssetId;

use async_lock::RwLock;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Re-export sub-client types for convenience.
pub use crate::domain::market::client::Markets as MarketsClient;
pub use crate::domain::price_history::client::PriceHistory as PriceHistoryClient;
pub use crate::domain::quote::client::Quotes as QuotesClient;

/// Default lifetime of cached market metadata.
pub const DEFAULT_MARKET_CACHE_TTL: Duration = Duration::from_secs(300);

/// The primary entry point for market data.
///
/// Provides nested sub-client accessors for each domain:
/// `client.quotes()`, `client.price_history()`, etc.
pub struct MarketClient<S> {
    pub(crate) source: S,
    pub(crate) config: Config,
    /// Market cache: asset → (MarketInfo, fetched_at)
    pub(crate) market_cache: Arc<RwLock<HashMap<AssetId, (MarketInfo, Instant)>>>,
    pub(crate) market_cache_ttl: Duration,
}

impl MarketClient<()> {
    pub fn builder() -> MarketClientBuilder {
        MarketClientBuilder::default()
    }
}

impl<S: MarketDataSource> MarketClient<S> {
    /// Wrap any source, e.g. a scripted one in tests.
    pub fn with_source(source: S, config: Config) -> Self {
        Self {
            source,
            config,
            market_cache: Arc::new(RwLock::new(HashMap::new())),
            market_cache_ttl: DEFAULT_MARKET_CACHE_TTL,
        }
    }

    /// One GET for `endpoint` with defaults applied to `params`. Exactly one
    /// attempt; the JSON body is returned as received.
    pub async fn fetch_market_data(
        &self,
        endpoint: Endpoint,
        params: FetchParams,
    ) -> Result<serde_json::Value, HttpError> {
        self.source.execute(params.into_request(endpoint)).await
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn quotes(&self) -> Quotes<'_, S> {
        Quotes { client: self }
    }

    pub fn markets(&self) -> Markets<'_, S> {
        Markets { client: self }
    }

    pub fn price_history(&self) -> PriceHistory<'_, S> {
        PriceHistory { client: self }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Clear all HTTP caches.
    pub async fn clear_all_caches(&self) {
        self.market_cache.write().await.clear();
    }
}

impl<S: Clone> Clone for MarketClient<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            config: self.config.clone(),
            market_cache: self.market_cache.clone(),
            market_cache_ttl: self.market_cache_ttl,
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct MarketClientBuilder {
    config: Config,
    market_cache_ttl: Duration,
}

impl Default for MarketClientBuilder {
    fn default() -> Self {
        Self {
            config: Config::default(),
            market_cache_ttl: DEFAULT_MARKET_CACHE_TTL,
        }
    }
}

impl MarketClientBuilder {
    /// Start from an existing configuration, e.g. `Config::from_env()`.
    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn target(mut self, target: FetchTarget) -> Self {
        self.config.target = target;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    pub fn request_delay(mut self, delay: Duration) -> Self {
        self.config.request_delay = delay;
        self
    }

    pub fn live_capacity(mut self, capacity: usize) -> Self {
        self.config.live_capacity = capacity;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn preferences_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.preferences_dir = Some(dir.into());
        self
    }

    pub fn market_cache_ttl(mut self, ttl: Duration) -> Self {
        self.market_cache_ttl = ttl;
        self
    }

    /// Finish with a caller-supplied source instead of the HTTP transport.
    pub fn build_with<S: MarketDataSource>(self, source: S) -> MarketClient<S> {
        let mut client = MarketClient::with_source(source, self.config);
        client.market_cache_ttl = self.market_cache_ttl;
        client
    }

    #[cfg(feature = "http")]
    pub fn build(
        self,
    ) -> Result<MarketClient<crate::http::MarketDataHttp>, crate::error::DashboardError> {
        let http = crate::http::MarketDataHttp::new(
            self.config.target.clone(),
            self.config.request_timeout,
        )
        .map_err(HttpError::from)?;
        Ok(self.build_with(http))
    }
}
