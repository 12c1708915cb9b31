//! Wire types for the prices endpoint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `{ "<asset id>": { usd, usd_24h_change, usd_24h_vol, usd_market_cap } }`
pub type SimplePriceResponse = HashMap<String, SimplePriceEntry>;

/// One asset's entry. Every field may be missing or `null` upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimplePriceEntry {
    #[serde(default)]
    pub usd: Option<f64>,
    #[serde(default)]
    pub usd_24h_change: Option<f64>,
    #[serde(default)]
    pub usd_24h_vol: Option<f64>,
    #[serde(default)]
    pub usd_market_cap: Option<f64>,
}
