//! Market domain — per-asset metadata from the markets endpoint.

pub mod client;
mod convert;
pub mod wire;

use serde::{Deserialize, Serialize};

pub use convert::market_info_from_wire;

/// Display metadata for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketInfo {
    /// Upper-cased ticker, e.g. `BTC`.
    pub symbol: String,
    /// Logo URL.
    pub image: Option<String>,
    pub name: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap_rank: Option<u32>,
}
