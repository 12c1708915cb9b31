//! Series state containers — app-owned, SDK-provided update logic.

use super::{HistoricalBatch, PricePoint};
use crate::shared::AssetId;
use std::collections::{HashMap, VecDeque};

/// Rolling live series for one asset.
///
/// Append-only; the oldest point is evicted once `capacity` is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveSeries {
    points: VecDeque<PricePoint>,
    capacity: usize,
}

impl LiveSeries {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point, evicting the oldest if at capacity. A point older than
    /// the newest one is rejected so the series stays non-decreasing.
    pub fn push(&mut self, point: PricePoint) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if let Some(last) = self.points.back() {
            if point.timestamp < last.timestamp {
                return false;
            }
        }
        if self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
        true
    }

    pub fn points(&self) -> &VecDeque<PricePoint> {
        &self.points
    }

    pub fn to_vec(&self) -> Vec<PricePoint> {
        self.points.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.back()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The series currently displayed, for every tracked asset.
///
/// Exactly one variant is live at a time: switching modes replaces the whole
/// book, never blends the two.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesBook {
    Live {
        capacity: usize,
        series: HashMap<AssetId, LiveSeries>,
    },
    Historical(HistoricalBatch),
}

impl Default for SeriesBook {
    fn default() -> Self {
        Self::Live {
            capacity: 0,
            series: HashMap::new(),
        }
    }
}

impl SeriesBook {
    /// Empty live series for each asset.
    pub fn live(ids: &[AssetId], capacity: usize) -> Self {
        Self::Live {
            capacity,
            series: ids
                .iter()
                .map(|id| (id.clone(), LiveSeries::new(capacity)))
                .collect(),
        }
    }

    pub fn historical(batch: HistoricalBatch) -> Self {
        Self::Historical(batch)
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live { .. })
    }

    /// Append to an asset's live series. Ignored while historical data is shown.
    pub fn push_live(&mut self, id: &AssetId, point: PricePoint) -> bool {
        match self {
            Self::Live { capacity, series } => series
                .entry(id.clone())
                .or_insert_with(|| LiveSeries::new(*capacity))
                .push(point),
            Self::Historical(_) => false,
        }
    }

    /// Displayed points for `id`; empty when unknown or when its fetch failed.
    pub fn points(&self, id: &AssetId) -> Vec<PricePoint> {
        match self {
            Self::Live { series, .. } => series.get(id).map(LiveSeries::to_vec).unwrap_or_default(),
            Self::Historical(batch) => batch.get(id).cloned().flatten().unwrap_or_default(),
        }
    }

    /// `Some(false)` marks an asset whose historical fetch failed.
    pub fn has_data(&self, id: &AssetId) -> Option<bool> {
        match self {
            Self::Live { series, .. } => series.get(id).map(|s| !s.is_empty()),
            Self::Historical(batch) => batch.get(id).map(Option::is_some),
        }
    }

    pub fn remove(&mut self, id: &AssetId) {
        match self {
            Self::Live { series, .. } => {
                series.remove(id);
            }
            Self::Historical(batch) => {
                batch.remove(id);
            }
        }
    }

    /// Number of assets with an entry.
    pub fn len(&self) -> usize {
        match self {
            Self::Live { series, .. } => series.len(),
            Self::Historical(batch) => batch.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
