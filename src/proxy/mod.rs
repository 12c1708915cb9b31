//! CORS reverse proxy for the three upstream resources.
//!
//! Stateless: no caching, no authentication, GET query strings only. Every
//! response carries permissive CORS headers and `OPTIONS` answers an empty 200.

pub mod error;
pub mod handlers;

pub use error::ProxyError;

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::HeaderValue;
use axum::middleware;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::config::{FetchTarget, ProxyConfig};
use crate::http::{MarketDataHttp, MarketDataSource};
use crate::network::{PROXY_HISTORY_PATH, PROXY_MARKETS_PATH, PROXY_PRICES_PATH};

/// Shared handler state: where requests are forwarded.
pub struct ProxyState<S> {
    pub source: S,
}

impl<S> ProxyState<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

/// Build the proxy router over any source.
pub fn router<S: MarketDataSource + 'static>(source: S) -> Router {
    let state = Arc::new(ProxyState::new(source));

    Router::new()
        .route(
            PROXY_PRICES_PATH,
            get(handlers::prices::<S>).options(handlers::preflight),
        )
        .route(
            PROXY_MARKETS_PATH,
            get(handlers::markets::<S>).options(handlers::preflight),
        )
        .route(
            PROXY_HISTORY_PATH,
            get(handlers::history::<S>).options(handlers::preflight),
        )
        .layer(middleware::map_response(cors_headers))
        .with_state(state)
}

/// Router forwarding straight to the configured upstream.
pub fn upstream_router(config: &ProxyConfig) -> Result<Router, reqwest::Error> {
    let http = MarketDataHttp::new(
        FetchTarget::direct(&config.upstream_url),
        crate::config::REQUEST_TIMEOUT,
    )?;
    Ok(router(http))
}

async fn cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}
