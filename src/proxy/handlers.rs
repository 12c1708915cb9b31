//! Pass-through handlers. Each one normalizes the query, forwards a single
//! GET upstream and returns the body verbatim.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::{ProxyError, ProxyState};
use crate::http::{Endpoint, FetchParams, MarketDataSource, UpstreamRequest};
use crate::shared::AssetId;

type Params = HashMap<String, String>;

/// OPTIONS — preflight, empty 200.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// GET /api/coingecko-prices
pub async fn prices<S: MarketDataSource>(
    State(state): State<Arc<ProxyState<S>>>,
    Query(q): Query<Params>,
) -> Result<Json<Value>, ProxyError> {
    let params = FetchParams {
        ids: split_ids(&q),
        currency: non_empty(&q, "vs_currencies"),
        ..FetchParams::default()
    };
    let mut request = params.into_request(Endpoint::Prices);
    pass_through(
        &mut request,
        &q,
        &["include_24hr_change", "include_24hr_vol", "include_market_cap"],
    );
    forward(&state, request).await
}

/// GET /api/coingecko-markets
pub async fn markets<S: MarketDataSource>(
    State(state): State<Arc<ProxyState<S>>>,
    Query(q): Query<Params>,
) -> Result<Json<Value>, ProxyError> {
    let params = FetchParams {
        ids: split_ids(&q),
        currency: non_empty(&q, "vs_currency"),
        order: non_empty(&q, "order"),
        ..FetchParams::default()
    };
    forward(&state, params.into_request(Endpoint::Markets)).await
}

/// GET /api/coingecko-history
///
/// `days` and `interval` go upstream as given (`days=max` included); only
/// absent values take the defaults.
pub async fn history<S: MarketDataSource>(
    State(state): State<Arc<ProxyState<S>>>,
    Query(q): Query<Params>,
) -> Result<Json<Value>, ProxyError> {
    let id = non_empty(&q, "id").ok_or(ProxyError::MissingParam("id"))?;

    let params = FetchParams {
        ids: vec![AssetId::from(id)],
        currency: non_empty(&q, "vs_currency"),
        ..FetchParams::default()
    };
    let mut request = params.into_request(Endpoint::Historical);
    pass_through(&mut request, &q, &["days", "interval"]);
    forward(&state, request).await
}

async fn forward<S: MarketDataSource>(
    state: &ProxyState<S>,
    request: UpstreamRequest,
) -> Result<Json<Value>, ProxyError> {
    let body = state.source.execute(request).await?;
    Ok(Json(body))
}

/// Absent and empty parameters both fall back to defaults.
fn non_empty(q: &Params, key: &str) -> Option<String> {
    q.get(key).filter(|v| !v.is_empty()).cloned()
}

/// Copy caller-supplied values over the defaults, unvalidated.
fn pass_through(request: &mut UpstreamRequest, q: &Params, keys: &[&'static str]) {
    for &key in keys {
        if let Some(value) = non_empty(q, key) {
            request.set_param(key, value);
        }
    }
}

fn split_ids(q: &Params) -> Vec<AssetId> {
    q.get("ids")
        .map(|ids| {
            ids.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(AssetId::from)
                .collect()
        })
        .unwrap_or_default()
}
