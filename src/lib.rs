//! # cryptolive
//!
//! Live and historical cryptocurrency price pipeline. Reconciles a polled
//! live feed and a rate-limited historical batch fetch into one time-series
//! shape a charting layer can consume.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Shared newtypes, formatting, domain models, configuration
//! 2. **HTTP API** — `MarketDataSource` seam and the `reqwest` transport, one attempt per call
//! 3. **High-Level Client** — `MarketClient` with nested sub-clients and caching
//! 4. **Orchestration** — Live poller, mode switch controller, persisted preferences
//! 5. **Proxy** — Optional `axum` CORS proxy (feature `proxy`)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cryptolive::prelude::*;
//!
//! let client = MarketClient::builder()
//!     .target(FetchTarget::proxy("http://localhost:3000"))
//!     .build()?;
//!
//! let mut dashboard = Dashboard::open(client).await;
//! dashboard.select_range(TimeRange::Week).await;
//! dashboard.settle().await;
//! let btc = dashboard.series(&AssetId::from("bitcoin")).await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and formatting used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified error types.
pub mod error;

/// Network URL constants.
pub mod network;

/// Pipeline constants and environment configuration.
pub mod config;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// Endpoint descriptors, the source seam and the HTTP transport.
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `MarketClient` — the primary entry point.
pub mod client;

// ── Layer 4: Orchestration ───────────────────────────────────────────────────

/// Recurring live snapshot polling.
pub mod live;

/// Mode switch controller and shared dashboard state.
pub mod dashboard;

/// Persisted tracked assets and colors.
pub mod preferences;

// ── Layer 5: Proxy ───────────────────────────────────────────────────────────

/// CORS reverse proxy endpoints.
#[cfg(feature = "proxy")]
pub mod proxy;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::fmt::{format_change, format_display_time, format_usd, Granularity};
    pub use crate::shared::{AssetId, Interval, TimeRange, Window};

    // Domain types
    pub use crate::domain::asset::{Asset, TrackedAssets};
    pub use crate::domain::market::MarketInfo;
    pub use crate::domain::price_history::{HistoricalBatch, LiveSeries, PricePoint, SeriesBook};
    pub use crate::domain::quote::{Quote, Snapshot};

    // Errors
    pub use crate::error::{DashboardError, ErrorKind, HttpError};

    // Configuration
    pub use crate::config::{Config, FetchTarget};
    pub use crate::network::{DEFAULT_PROXY_URL, DEFAULT_UPSTREAM_URL};

    // HTTP layer + client
    pub use crate::client::{
        MarketClient, MarketClientBuilder, MarketsClient, PriceHistoryClient, QuotesClient,
    };
    pub use crate::http::{Endpoint, FetchParams, MarketDataSource, UpstreamRequest};
    #[cfg(feature = "http")]
    pub use crate::http::MarketDataHttp;

    // Orchestration
    pub use crate::dashboard::{
        Dashboard, DashboardEvent, DashboardState, ErrorBanner, Session, SummaryEntry,
    };
    pub use crate::live::{LivePoller, LiveSink, LiveTick, PollHandle};
    pub use crate::preferences::PreferenceStore;
}
