//! Scripted in-memory `MarketDataSource` shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cryptolive::client::MarketClient;
use cryptolive::config::Config;
use cryptolive::error::HttpError;
use cryptolive::http::{Endpoint, MarketDataSource, UpstreamRequest};
use serde_json::{json, Value};
use tokio::time::Instant;

pub type Reply = Result<Value, HttpError>;

/// One recorded upstream call.
#[derive(Debug, Clone)]
pub struct Call {
    pub request: UpstreamRequest,
    pub started: Instant,
    pub finished: Instant,
}

/// Replies are queued per route (`prices`, `markets`, `historical:<id>`).
/// The last reply of a route repeats once the queue is down to one.
#[derive(Default)]
pub struct ScriptedSource {
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    latency: Duration,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps this long before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn on_prices(self, reply: Reply) -> Self {
        self.push("prices".to_string(), reply);
        self
    }

    pub fn on_history(self, asset: &str, reply: Reply) -> Self {
        self.push(format!("historical:{asset}"), reply);
        self
    }

    pub fn push(&self, route: String, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .entry(route)
            .or_default()
            .push_back(reply);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, endpoint: Endpoint) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.request.endpoint == endpoint)
            .collect()
    }

    fn route_of(request: &UpstreamRequest) -> String {
        match request.endpoint {
            Endpoint::Historical => format!(
                "historical:{}",
                request.asset.as_ref().map(|a| a.as_str()).unwrap_or_default()
            ),
            other => other.as_str().to_string(),
        }
    }

    fn next_reply(&self, route: &str) -> Reply {
        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(route) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Err(HttpError::Upstream {
                status: 404,
                body: format!("no script for {route}"),
            }),
        }
    }
}

impl MarketDataSource for ScriptedSource {
    async fn execute(&self, request: UpstreamRequest) -> Result<Value, HttpError> {
        let started = Instant::now();
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let reply = self.next_reply(&Self::route_of(&request));
        self.calls.lock().unwrap().push(Call {
            request,
            started,
            finished: Instant::now(),
        });
        reply
    }
}

pub fn client(source: Arc<ScriptedSource>) -> MarketClient<Arc<ScriptedSource>> {
    MarketClient::with_source(source, Config::default())
}

pub fn client_with(source: Arc<ScriptedSource>, config: Config) -> MarketClient<Arc<ScriptedSource>> {
    MarketClient::with_source(source, config)
}

// 2023-11-14T00:00:00Z
pub const DAY0_MS: i64 = 1_699_920_000_000;
pub const DAY_MS: i64 = 86_400_000;
pub const HOUR_MS: i64 = 3_600_000;

/// `market_chart` body with `n` points spaced `step_ms` apart.
pub fn chart(n: usize, step_ms: i64, price: f64) -> Value {
    let prices: Vec<Value> = (0..n)
        .map(|i| json!([DAY0_MS + i as i64 * step_ms, price + i as f64]))
        .collect();
    json!({ "prices": prices })
}

/// `simple/price` body.
pub fn prices(entries: &[(&str, f64, f64)]) -> Value {
    let mut body = serde_json::Map::new();
    for (id, usd, change) in entries {
        body.insert(
            id.to_string(),
            json!({ "usd": usd, "usd_24h_change": change }),
        );
    }
    Value::Object(body)
}
