//! Chart colors.

use crate::shared::AssetId;
use rand::seq::SliceRandom;
use std::collections::HashMap;

/// Colors handed out to newly added assets.
pub const PALETTE: &[&str] = &[
    "#F7931A", "#627EEA", "#F3BA2F", "#3498DB", "#14F195", "#00AAE4", "#E74C3C", "#9B59B6",
    "#1ABC9C", "#F39C12", "#E67E22", "#16A085", "#8E44AD", "#2ECC71", "#F1C40F", "#95A5A6",
    "#D35400", "#27AE60", "#2980B9", "#C0392B", "#7F8C8D",
];

/// Used when no palette color is available.
pub const FALLBACK_COLOR: &str = "#7F8C8D";

const DEFAULT_COLORS: &[(&str, &str)] = &[
    ("bitcoin", "#F7931A"),
    ("ethereum", "#627EEA"),
    ("binancecoin", "#F3BA2F"),
    ("cardano", "#3498DB"),
    ("solana", "#14F195"),
    ("ripple", "#00AAE4"),
];

/// Fixed color for one of the default assets.
pub fn default_color(id: &AssetId) -> Option<&'static str> {
    DEFAULT_COLORS
        .iter()
        .find(|(k, _)| *k == id.as_str())
        .map(|(_, c)| *c)
}

/// Color map used when nothing is persisted.
pub fn default_colors() -> HashMap<AssetId, String> {
    DEFAULT_COLORS
        .iter()
        .map(|(id, c)| (AssetId::from(*id), c.to_string()))
        .collect()
}

pub fn random_color() -> &'static str {
    PALETTE
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_COLOR)
}
