//! Dashboard — the mode switch controller.
//!
//! Owns the session, the shared [`DashboardState`], the live poll handle and
//! any pending historical load. Exactly one of live polling or historical
//! loading drives the displayed series at a time: entering a historical range
//! stops the poller first, and entering LIVE bumps the generation so an
//! in-flight historical result is discarded when it lands.

pub mod session;
pub mod state;

pub use session::{Session, SummaryEntry};
pub use state::{DashboardEvent, DashboardState, ErrorBanner};

use crate::client::MarketClient;
use crate::domain::asset::TrackedAssets;
use crate::domain::price_history::{PricePoint, SeriesBook};
use crate::domain::quote::Snapshot;
use crate::error::DashboardError;
use crate::http::MarketDataSource;
use crate::live::{LivePoller, PollHandle};
use crate::preferences::PreferenceStore;
use crate::shared::{AssetId, TimeRange};

use async_lock::RwLock;
use chrono::{DateTime, Utc};
use futures_util::Stream;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const EVENT_CHANNEL_CAPACITY: usize = 256;

pub struct Dashboard<S> {
    client: Arc<MarketClient<S>>,
    store: Option<PreferenceStore>,
    session: Session,
    state: Arc<RwLock<DashboardState>>,
    poller: Option<PollHandle>,
    pending: Vec<JoinHandle<()>>,
    event_rx: tokio::sync::Mutex<mpsc::Receiver<DashboardEvent>>,
}

impl<S: MarketDataSource + 'static> Dashboard<S> {
    /// Load the session from the configured preferences directory (or use
    /// defaults) and start in LIVE mode.
    pub async fn open(client: MarketClient<S>) -> Self {
        let store = client
            .config()
            .preferences_dir
            .clone()
            .map(PreferenceStore::new);
        let session = store
            .as_ref()
            .map(PreferenceStore::load_session)
            .unwrap_or_default();
        Self::with_session(client, session, store).await
    }

    /// Start in LIVE mode with an explicit session.
    pub async fn with_session(
        client: MarketClient<S>,
        session: Session,
        store: Option<PreferenceStore>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let state = DashboardState::new(session.tracked().as_slice().to_vec(), event_tx);

        let mut dashboard = Self {
            client: Arc::new(client),
            store,
            session,
            state: Arc::new(RwLock::new(state)),
            poller: None,
            pending: Vec::new(),
            event_rx: tokio::sync::Mutex::new(event_rx),
        };
        dashboard.start_live().await;
        dashboard
    }

    // ── Mode switching ───────────────────────────────────────────────────

    /// Make `range` the active mode. Selecting the active range does nothing.
    ///
    /// For a historical range this returns once the load has been started;
    /// call [`settle`](Self::settle) to wait for its result.
    pub async fn select_range(&mut self, range: TimeRange) {
        if self.state.read().await.range == range {
            return;
        }

        match range.window() {
            None => self.start_live().await,
            Some(window) => {
                self.stop_poller().await;
                let generation = self.state.write().await.begin_historical(range);
                tracing::info!(%range, generation, "loading historical data");

                let client = Arc::clone(&self.client);
                let state = Arc::clone(&self.state);
                let ids = self.session.tracked().as_slice().to_vec();
                let task = tokio::spawn(async move {
                    let result = client.price_history().fetch_all(&ids, window.days).await;
                    state.write().await.finish_historical(generation, result);
                });

                self.pending.retain(|t| !t.is_finished());
                self.pending.push(task);
            }
        }
    }

    /// Escape hatch from a failed historical load.
    pub async fn back_to_live(&mut self) {
        self.select_range(TimeRange::Live).await;
    }

    pub async fn dismiss_error(&self) {
        self.state.write().await.dismiss_banner();
    }

    /// Wait for every started historical load to finish (applied or discarded).
    pub async fn settle(&mut self) {
        for task in self.pending.drain(..) {
            let _ = task.await;
        }
    }

    /// Stop polling and abandon pending loads.
    pub async fn shutdown(&mut self) {
        self.stop_poller().await;
        for task in self.pending.drain(..) {
            task.abort();
        }
    }

    // ── Tracked assets ───────────────────────────────────────────────────

    /// Track `id`. Returns `false` if it was already tracked.
    ///
    /// In LIVE mode polling restarts for the new set; in a historical range
    /// the new asset has no series until the next load.
    pub async fn add_asset(&mut self, id: AssetId) -> bool {
        if !self.session.add(id) {
            return false;
        }
        self.persist();
        self.assets_changed().await;
        true
    }

    /// Stop tracking `id`. Removing the last asset fails and changes nothing.
    pub async fn remove_asset(&mut self, id: &AssetId) -> Result<bool, DashboardError> {
        if !self.session.remove(id)? {
            return Ok(false);
        }
        self.persist();
        self.state.write().await.drop_series(id);
        self.assets_changed().await;
        Ok(true)
    }

    async fn assets_changed(&mut self) {
        {
            let mut state = self.state.write().await;
            state.set_tracked(self.session.tracked().as_slice().to_vec());
            state.notify(DashboardEvent::AssetsChanged);
        }
        if self.state.read().await.range.is_live() {
            self.start_live().await;
        }
    }

    fn persist(&self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.save_session(&self.session) {
            tracing::warn!(dir = %store.dir().display(), "failed to persist session: {e}");
        }
    }

    // ── Live polling ─────────────────────────────────────────────────────

    async fn start_live(&mut self) {
        self.stop_poller().await;
        let capacity = self.client.config().live_capacity;
        let generation = self.state.write().await.enter_live(capacity);
        self.poller = Some(LivePoller::start(
            Arc::clone(&self.client),
            self.session.tracked().as_slice().to_vec(),
            generation,
            Arc::clone(&self.state),
        ));
    }

    async fn stop_poller(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop().await;
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|p| !p.is_finished())
    }

    // ── Read access ──────────────────────────────────────────────────────

    pub fn client(&self) -> &MarketClient<S> {
        &self.client
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn tracked(&self) -> &TrackedAssets {
        self.session.tracked()
    }

    pub fn colors(&self) -> &HashMap<AssetId, String> {
        self.session.colors()
    }

    /// Shared state, for callers that want to hold the read lock themselves.
    pub fn state(&self) -> Arc<RwLock<DashboardState>> {
        Arc::clone(&self.state)
    }

    pub async fn range(&self) -> TimeRange {
        self.state.read().await.range()
    }

    pub async fn generation(&self) -> u64 {
        self.state.read().await.generation()
    }

    /// Displayed points for one asset.
    pub async fn series(&self, id: &AssetId) -> Vec<PricePoint> {
        self.state.read().await.points(id)
    }

    /// Displayed points for every tracked asset.
    pub async fn all_series(&self) -> HashMap<AssetId, Vec<PricePoint>> {
        let state = self.state.read().await;
        self.session
            .tracked()
            .iter()
            .map(|id| (id.clone(), state.points(id)))
            .collect()
    }

    pub async fn series_book(&self) -> SeriesBook {
        self.state.read().await.series().clone()
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.state.read().await.snapshot().clone()
    }

    pub async fn summary(&self) -> Vec<SummaryEntry> {
        let state = self.state.read().await;
        self.session.summary(state.snapshot())
    }

    pub async fn banner(&self) -> Option<ErrorBanner> {
        self.state.read().await.banner().cloned()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading()
    }

    pub async fn last_update(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.last_update()
    }

    /// Stream of state-change notifications.
    ///
    /// The returned stream borrows `self`; events that arrive while nobody
    /// listens are dropped once the channel is full.
    pub fn events(&self) -> Pin<Box<dyn Stream<Item = DashboardEvent> + Send + '_>> {
        Box::pin(futures_util::stream::unfold(
            &self.event_rx,
            |rx| async move {
                let mut guard = rx.lock().await;
                guard.recv().await.map(|event| (event, rx))
            },
        ))
    }
}

impl<S> Drop for Dashboard<S> {
    fn drop(&mut self) {
        for task in self.pending.drain(..) {
            task.abort();
        }
    }
}
