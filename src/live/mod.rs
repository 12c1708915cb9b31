//! Live poller — recurring quote snapshots on a background task.
//!
//! `LivePoller::start` fetches immediately, then once per poll interval until
//! the returned [`PollHandle`] is stopped or dropped. Each tick is fetched and
//! applied inside the one task, so ticks never overlap; a tick that comes due
//! while a fetch is still pending is skipped. Failed fetches are dropped
//! silently and leave the sink untouched.

use crate::client::MarketClient;
use crate::domain::price_history::PricePoint;
use crate::domain::quote::Quote;
use crate::http::MarketDataSource;
use crate::shared::fmt::{format_display_time, Granularity};
use crate::shared::AssetId;

use async_lock::RwLock;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// One successful poll.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveTick {
    /// Generation the poller was started under.
    pub generation: u64,
    pub at: DateTime<Utc>,
    pub quotes: HashMap<AssetId, Quote>,
}

impl LiveTick {
    /// Chart point for `id`, if this tick carries a quote for it.
    pub fn point_for(&self, id: &AssetId) -> Option<PricePoint> {
        let quote = self.quotes.get(id)?;
        let timestamp = self.at.timestamp_millis();
        Some(PricePoint {
            timestamp,
            price: quote.price_usd,
            display_time: format_display_time(timestamp, Granularity::Clock),
        })
    }
}

/// Receiver of live ticks.
pub trait LiveSink: Send + Sync + 'static {
    fn apply_tick(&mut self, tick: LiveTick);
}

pub struct LivePoller;

impl LivePoller {
    /// Spawn the polling task for `assets`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<S, K>(
        client: Arc<MarketClient<S>>,
        assets: Vec<AssetId>,
        generation: u64,
        sink: Arc<RwLock<K>>,
    ) -> PollHandle
    where
        S: MarketDataSource + 'static,
        K: LiveSink,
    {
        tracing::debug!(generation, assets = assets.len(), "live poller started");
        let task = tokio::spawn(run_poller(client, assets, generation, sink));
        PollHandle {
            generation,
            task: Some(task),
        }
    }
}

async fn run_poller<S, K>(
    client: Arc<MarketClient<S>>,
    assets: Vec<AssetId>,
    generation: u64,
    sink: Arc<RwLock<K>>,
) where
    S: MarketDataSource,
    K: LiveSink,
{
    // `interval` panics on a zero period.
    let period = client.config().poll_interval.max(Duration::from_millis(1));
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        // First tick completes immediately.
        interval.tick().await;

        match client.quotes().snapshot(&assets).await {
            Ok(quotes) => {
                let tick = LiveTick {
                    generation,
                    at: Utc::now(),
                    quotes,
                };
                sink.write().await.apply_tick(tick);
            }
            Err(e) => {
                tracing::debug!(generation, kind = %e.kind(), "live tick skipped: {e}");
            }
        }
    }
}

/// Handle to a running poller. Dropping it aborts the task.
#[derive(Debug)]
pub struct PollHandle {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Abort the task and wait until it has actually terminated. No tick is
    /// applied after this returns.
    pub async fn stop(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
            tracing::debug!(generation = self.generation, "live poller stopped");
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::HttpError;
    use crate::http::{Endpoint, UpstreamRequest};
    use serde_json::json;
    use std::sync::Mutex;

    /// Serves scripted price bodies in order, then repeats the last one.
    struct ScriptedPrices {
        replies: Mutex<Vec<Result<serde_json::Value, HttpError>>>,
        calls: Mutex<Vec<UpstreamRequest>>,
    }

    impl ScriptedPrices {
        fn new(replies: Vec<Result<serde_json::Value, HttpError>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl MarketDataSource for ScriptedPrices {
        async fn execute(&self, request: UpstreamRequest) -> Result<serde_json::Value, HttpError> {
            assert_eq!(request.endpoint, Endpoint::Prices);
            self.calls.lock().unwrap().push(request);
            let mut replies = self.replies.lock().unwrap();
            if replies.len() > 1 {
                replies.remove(0)
            } else {
                replies[0].clone()
            }
        }
    }

    #[derive(Default)]
    struct Recorder {
        ticks: Vec<LiveTick>,
    }

    impl LiveSink for Recorder {
        fn apply_tick(&mut self, tick: LiveTick) {
            self.ticks.push(tick);
        }
    }

    fn client(source: Arc<ScriptedPrices>) -> Arc<MarketClient<Arc<ScriptedPrices>>> {
        let config = Config {
            poll_interval: Duration::from_secs(10),
            ..Config::default()
        };
        Arc::new(MarketClient::with_source(source, config))
    }

    fn btc() -> Vec<AssetId> {
        vec![AssetId::from("bitcoin")]
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_is_immediate_then_every_interval() {
        let source = Arc::new(ScriptedPrices::new(vec![Ok(json!({"bitcoin": {"usd": 1.0}}))]));
        let sink = Arc::new(RwLock::new(Recorder::default()));
        let handle = LivePoller::start(client(source.clone()), btc(), 3, sink.clone());

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(source.call_count(), 1);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(source.call_count(), 2);

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(source.call_count(), 4);

        let recorded = sink.read().await;
        assert_eq!(recorded.ticks.len(), 4);
        assert!(recorded.ticks.iter().all(|t| t.generation == 3));
        drop(recorded);
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_tick_is_skipped() {
        let source = Arc::new(ScriptedPrices::new(vec![
            Err(HttpError::RateLimited),
            Ok(json!({"bitcoin": {"usd": 2.0}})),
        ]));
        let sink = Arc::new(RwLock::new(Recorder::default()));
        let handle = LivePoller::start(client(source.clone()), btc(), 0, sink.clone());

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(sink.read().await.ticks.is_empty());

        tokio::time::sleep(Duration::from_secs(10)).await;
        let recorded = sink.read().await;
        assert_eq!(recorded.ticks.len(), 1);
        assert_eq!(
            recorded.ticks[0].quotes[&AssetId::from("bitcoin")].price_usd,
            2.0
        );
        drop(recorded);
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_after_stop() {
        let source = Arc::new(ScriptedPrices::new(vec![Ok(json!({"bitcoin": {"usd": 1.0}}))]));
        let sink = Arc::new(RwLock::new(Recorder::default()));
        let handle = LivePoller::start(client(source.clone()), btc(), 0, sink.clone());

        tokio::time::sleep(Duration::from_millis(1)).await;
        handle.stop().await;
        let calls = source.call_count();

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(source.call_count(), calls);
        assert_eq!(sink.read().await.ticks.len(), calls);
    }

    #[test]
    fn test_point_for_uses_tick_time() {
        let at = DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000).unwrap();
        let tick = LiveTick {
            generation: 0,
            at,
            quotes: HashMap::from([(
                AssetId::from("bitcoin"),
                Quote {
                    price_usd: 50000.0,
                    change_24h_pct: Some(2.5),
                    volume_24h: None,
                    market_cap: None,
                },
            )]),
        };
        let point = tick.point_for(&AssetId::from("bitcoin")).unwrap();
        assert_eq!(point.timestamp, 1_700_000_000_000);
        assert_eq!(point.price, 50000.0);
        assert_eq!(point.display_time, "22:13:20");
        assert!(tick.point_for(&AssetId::from("ethereum")).is_none());
    }
}
