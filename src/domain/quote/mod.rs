//! Quote domain — current price snapshot per asset.

pub mod client;
mod convert;
pub mod state;
pub mod wire;

use serde::{Deserialize, Serialize};

pub use convert::quotes_from_wire;
pub use state::Snapshot;

/// Latest live quote for one asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price_usd: f64,
    pub change_24h_pct: Option<f64>,
    pub volume_24h: Option<f64>,
    pub market_cap: Option<f64>,
}
