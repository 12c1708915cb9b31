//! Price history domain — chart points, live ring buffers, historical batches.

pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::shared::AssetId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use convert::series_from_wire;
pub use state::{LiveSeries, SeriesBook};

/// A single point on a price chart. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    pub price: f64,
    /// Pre-formatted label for the chart axis.
    pub display_time: String,
}

/// Result of one aggregation: every requested asset maps to its series, or to
/// `None` when that asset alone failed.
pub type HistoricalBatch = HashMap<AssetId, Option<Vec<PricePoint>>>;
