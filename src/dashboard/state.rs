//! Shared dashboard state — written by the live poller, the historical
//! loader and the controller, read by the presentation layer.

use crate::domain::price_history::{HistoricalBatch, PricePoint, SeriesBook};
use crate::domain::quote::Snapshot;
use crate::error::{ErrorKind, HttpError};
use crate::live::{LiveSink, LiveTick};
use crate::shared::{AssetId, TimeRange};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Notification emitted on every visible state change.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// A range was entered. For historical ranges, loading has begun.
    RangeSelected(TimeRange),
    /// A live tick was applied.
    LiveUpdated { at: DateTime<Utc> },
    /// A historical batch replaced the displayed series.
    HistoricalLoaded { range: TimeRange, at: DateTime<Utc> },
    /// A historical load failed; the displayed series were kept.
    LoadFailed(ErrorBanner),
    BannerDismissed,
    AssetsChanged,
}

/// Dismissible error shown after a failed historical load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBanner {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorBanner {
    pub fn from_error(err: &HttpError) -> Self {
        let kind = err.kind();
        let message = match kind {
            ErrorKind::Blocked => {
                "The API is blocking requests (CORS). Use Live mode, which keeps working."
            }
            ErrorKind::RateLimit => {
                "Request limit exceeded. Wait 1-2 minutes before trying again, or use Live mode."
            }
            ErrorKind::UpstreamError | ErrorKind::MissingParam => {
                "Could not load historical data. Use Live mode or try again later."
            }
        };
        Self {
            kind,
            message: message.to_string(),
        }
    }
}

/// Everything the presentation layer renders.
///
/// Every mode switch bumps `generation`; results tagged with an older
/// generation are dropped on arrival.
#[derive(Debug)]
pub struct DashboardState {
    pub(crate) generation: u64,
    pub(crate) range: TimeRange,
    pub(crate) tracked: Vec<AssetId>,
    pub(crate) series: SeriesBook,
    pub(crate) snapshot: Snapshot,
    pub(crate) last_update: Option<DateTime<Utc>>,
    pub(crate) loading: bool,
    pub(crate) banner: Option<ErrorBanner>,
    event_tx: mpsc::Sender<DashboardEvent>,
}

impl DashboardState {
    pub(crate) fn new(tracked: Vec<AssetId>, event_tx: mpsc::Sender<DashboardEvent>) -> Self {
        Self {
            generation: 0,
            range: TimeRange::Live,
            tracked,
            series: SeriesBook::default(),
            snapshot: Snapshot::new(),
            last_update: None,
            loading: false,
            banner: None,
            event_tx,
        }
    }

    fn emit(&self, event: DashboardEvent) {
        let _ = self.event_tx.try_send(event);
    }

    /// Switch to LIVE with empty series. Returns the new generation.
    pub(crate) fn enter_live(&mut self, capacity: usize) -> u64 {
        self.generation += 1;
        self.range = TimeRange::Live;
        self.series = SeriesBook::live(&self.tracked, capacity);
        self.loading = false;
        self.emit(DashboardEvent::RangeSelected(TimeRange::Live));
        self.generation
    }

    /// Mark a historical load for `range` as started. The displayed series
    /// stay in place until the load succeeds.
    pub(crate) fn begin_historical(&mut self, range: TimeRange) -> u64 {
        self.generation += 1;
        self.range = range;
        self.loading = true;
        self.banner = None;
        self.emit(DashboardEvent::RangeSelected(range));
        self.generation
    }

    /// Apply a finished load. Returns `false` if it was stale and dropped.
    pub(crate) fn finish_historical(
        &mut self,
        generation: u64,
        result: Result<HistoricalBatch, HttpError>,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "discarding stale historical result"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(mut batch) => {
                // Assets removed while the load was in flight stay removed.
                batch.retain(|id, _| self.tracked.contains(id));
                let at = Utc::now();
                self.series = SeriesBook::historical(batch);
                self.last_update = Some(at);
                self.emit(DashboardEvent::HistoricalLoaded {
                    range: self.range,
                    at,
                });
            }
            Err(e) => {
                tracing::warn!(range = %self.range, kind = %e.kind(), "historical load failed: {e}");
                let banner = ErrorBanner::from_error(&e);
                self.banner = Some(banner.clone());
                self.emit(DashboardEvent::LoadFailed(banner));
            }
        }
        true
    }

    pub(crate) fn set_tracked(&mut self, tracked: Vec<AssetId>) {
        self.tracked = tracked;
    }

    pub(crate) fn drop_series(&mut self, id: &AssetId) {
        self.series.remove(id);
    }

    pub(crate) fn dismiss_banner(&mut self) -> bool {
        let had = self.banner.take().is_some();
        if had {
            self.emit(DashboardEvent::BannerDismissed);
        }
        had
    }

    pub(crate) fn notify(&self, event: DashboardEvent) {
        self.emit(event);
    }

    // ── Read access ──────────────────────────────────────────────────────

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    pub fn series(&self) -> &SeriesBook {
        &self.series
    }

    pub fn points(&self, id: &AssetId) -> Vec<PricePoint> {
        self.series.points(id)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn banner(&self) -> Option<&ErrorBanner> {
        self.banner.as_ref()
    }
}

impl LiveSink for DashboardState {
    fn apply_tick(&mut self, tick: LiveTick) {
        if tick.generation != self.generation || !self.range.is_live() {
            tracing::debug!(
                generation = tick.generation,
                current = self.generation,
                "discarding stale live tick"
            );
            return;
        }

        for id in &self.tracked {
            if let Some(point) = tick.point_for(id) {
                self.series.push_live(id, point);
            }
        }
        let at = tick.at;
        self.snapshot.apply_tick(tick.quotes, at);
        self.last_update = Some(at);
        self.emit(DashboardEvent::LiveUpdated { at });
    }
}
