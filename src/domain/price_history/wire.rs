//! Wire types for the historical endpoint.

use serde::{Deserialize, Serialize};

/// `{ "prices": [[timestampMs, price], ...], ... }`. Market caps and volumes
/// ride along upstream but are not charted. Gaps arrive as `[ts, null]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketChartResponse {
    pub prices: Vec<(f64, Option<f64>)>,
}
