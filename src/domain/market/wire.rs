//! Wire types for the markets endpoint.

use serde::{Deserialize, Serialize};

/// One element of the markets array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinMarket {
    pub id: String,
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
}

pub type MarketsResponse = Vec<CoinMarket>;
