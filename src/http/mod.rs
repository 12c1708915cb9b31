//! HTTP layer — endpoint descriptors, the `MarketDataSource` seam and the
//! reqwest transport.
//!
//! Every call is exactly one attempt. Throttling and failure policy belong to
//! the callers (historical aggregator, live poller), not to this layer.

pub mod endpoint;

#[cfg(feature = "http")]
pub mod client;

use std::future::Future;
use std::sync::Arc;

use crate::error::HttpError;

pub use endpoint::{Endpoint, FetchParams, UpstreamRequest};

#[cfg(feature = "http")]
pub use client::MarketDataHttp;

/// Anything that can answer an upstream request with a JSON body.
///
/// The production implementation is [`MarketDataHttp`]; tests script their own.
pub trait MarketDataSource: Send + Sync {
    fn execute(
        &self,
        request: UpstreamRequest,
    ) -> impl Future<Output = Result<serde_json::Value, HttpError>> + Send;
}

impl<S: MarketDataSource> MarketDataSource for Arc<S> {
    fn execute(
        &self,
        request: UpstreamRequest,
    ) -> impl Future<Output = Result<serde_json::Value, HttpError>> + Send {
        (**self).execute(request)
    }
}
