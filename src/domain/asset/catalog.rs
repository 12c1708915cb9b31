//! Static catalog of assets the search box offers.

use super::TrackedAssets;
use crate::shared::AssetId;

/// Catalog metadata for one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
}

const fn entry(id: &'static str, name: &'static str, symbol: &'static str) -> CatalogEntry {
    CatalogEntry { id, name, symbol }
}

pub const KNOWN_ASSETS: &[CatalogEntry] = &[
    entry("bitcoin", "Bitcoin", "BTC"),
    entry("ethereum", "Ethereum", "ETH"),
    entry("binancecoin", "Binance Coin", "BNB"),
    entry("cardano", "Cardano", "ADA"),
    entry("solana", "Solana", "SOL"),
    entry("ripple", "Ripple", "XRP"),
    entry("polkadot", "Polkadot", "DOT"),
    entry("dogecoin", "Dogecoin", "DOGE"),
    entry("avalanche-2", "Avalanche", "AVAX"),
    entry("chainlink", "Chainlink", "LINK"),
    entry("matic-network", "Polygon", "MATIC"),
    entry("litecoin", "Litecoin", "LTC"),
    entry("uniswap", "Uniswap", "UNI"),
    entry("stellar", "Stellar", "XLM"),
    entry("monero", "Monero", "XMR"),
    entry("ethereum-classic", "Ethereum Classic", "ETC"),
    entry("tron", "TRON", "TRX"),
    entry("shiba-inu", "Shiba Inu", "SHIB"),
    entry("cosmos", "Cosmos", "ATOM"),
    entry("near", "NEAR Protocol", "NEAR"),
];

/// Tracked on first start, in display order.
pub const DEFAULT_ASSETS: &[&str] = &[
    "bitcoin",
    "ethereum",
    "binancecoin",
    "cardano",
    "solana",
    "ripple",
];

/// Maximum number of suggestions returned by [`search`].
pub const MAX_SUGGESTIONS: usize = 8;

pub fn lookup(id: &AssetId) -> Option<&'static CatalogEntry> {
    KNOWN_ASSETS.iter().find(|e| e.id == id.as_str())
}

pub fn display_name(id: &AssetId) -> String {
    lookup(id)
        .map(|e| e.name.to_string())
        .unwrap_or_else(|| id.to_string())
}

/// Catalog symbol, or the upper-cased initials of the id's dash-separated words.
pub fn display_symbol(id: &AssetId) -> String {
    match lookup(id) {
        Some(e) => e.symbol.to_string(),
        None => id
            .as_str()
            .split('-')
            .filter_map(|w| w.chars().next())
            .collect::<String>()
            .to_uppercase(),
    }
}

/// Case-insensitive match on name, symbol or id, skipping tracked assets.
pub fn search(query: &str, tracked: &TrackedAssets) -> Vec<&'static CatalogEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    KNOWN_ASSETS
        .iter()
        .filter(|e| !tracked.contains(&AssetId::from(e.id)))
        .filter(|e| {
            e.name.to_lowercase().contains(&needle)
                || e.symbol.to_lowercase().contains(&needle)
                || e.id.contains(&needle)
        })
        .take(MAX_SUGGESTIONS)
        .collect()
}
