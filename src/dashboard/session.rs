//! Session — tracked assets and their display colors.

use crate::domain::asset::{default_color, palette, random_color, Asset, TrackedAssets};
use crate::domain::quote::Snapshot;
use crate::error::DashboardError;
use crate::shared::AssetId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// User-owned dashboard state: what is tracked and how it is colored.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub(crate) tracked: TrackedAssets,
    pub(crate) colors: HashMap<AssetId, String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            tracked: TrackedAssets::defaults(),
            colors: palette::default_colors(),
        }
    }
}

impl Session {
    pub fn new(tracked: TrackedAssets, colors: HashMap<AssetId, String>) -> Self {
        Self { tracked, colors }
    }

    pub fn tracked(&self) -> &TrackedAssets {
        &self.tracked
    }

    pub fn colors(&self) -> &HashMap<AssetId, String> {
        &self.colors
    }

    /// Color for `id`: assigned color, then the built-in default, then neutral gray.
    pub fn color_of(&self, id: &AssetId) -> String {
        self.colors
            .get(id)
            .cloned()
            .or_else(|| default_color(id).map(str::to_string))
            .unwrap_or_else(|| palette::FALLBACK_COLOR.to_string())
    }

    /// Track `id`, assigning a random palette color if it has none.
    /// Returns `false` if it was already tracked.
    pub fn add(&mut self, id: AssetId) -> bool {
        if !self.tracked.insert(id.clone()) {
            return false;
        }
        self.colors
            .entry(id)
            .or_insert_with(|| random_color().to_string());
        true
    }

    /// Colors are kept so a re-added asset gets its old color back.
    pub fn remove(&mut self, id: &AssetId) -> Result<bool, DashboardError> {
        self.tracked.remove(id)
    }

    pub fn assets(&self) -> Vec<Asset> {
        self.tracked
            .iter()
            .map(|id| Asset::resolve(id, &self.color_of(id)))
            .collect()
    }

    /// One summary card per tracked asset, in tracking order.
    pub fn summary(&self, snapshot: &Snapshot) -> Vec<SummaryEntry> {
        self.assets()
            .into_iter()
            .map(|asset| {
                let quote = snapshot.get(&asset.id);
                SummaryEntry {
                    price: quote.map(|q| q.price_usd),
                    change_24h: quote.and_then(|q| q.change_24h_pct),
                    id: asset.id,
                    name: asset.name,
                    symbol: asset.symbol,
                    color: asset.color,
                }
            })
            .collect()
    }
}

/// Summary card data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub id: AssetId,
    pub name: String,
    pub symbol: String,
    pub color: String,
    pub price: Option<f64>,
    pub change_24h: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::Quote;
    use chrono::Utc;

    #[test]
    fn test_default_session() {
        let session = Session::default();
        assert_eq!(session.tracked().len(), 6);
        assert_eq!(session.color_of(&AssetId::from("bitcoin")), "#F7931A");
    }

    #[test]
    fn test_add_assigns_palette_color_once() {
        let mut session = Session::default();
        let dot = AssetId::from("polkadot");
        assert!(session.add(dot.clone()));
        let color = session.colors()[&dot].clone();
        assert!(palette::PALETTE.contains(&color.as_str()));
        assert!(!session.add(dot.clone()));
        assert_eq!(session.colors()[&dot], color);
        assert_eq!(session.tracked().len(), 7);
    }

    #[test]
    fn test_add_keeps_existing_color() {
        let mut session = Session::default();
        let btc = AssetId::from("bitcoin");
        session.remove(&btc).unwrap();
        session.add(btc.clone());
        assert_eq!(session.color_of(&btc), "#F7931A");
    }

    #[test]
    fn test_summary_reads_snapshot() {
        let session = Session::new(
            TrackedAssets::new([AssetId::from("bitcoin"), AssetId::from("avalanche-2")]).unwrap(),
            HashMap::new(),
        );
        let mut snapshot = Snapshot::new();
        snapshot.apply_tick(
            HashMap::from([(
                AssetId::from("bitcoin"),
                Quote {
                    price_usd: 50000.0,
                    change_24h_pct: Some(2.5),
                    volume_24h: None,
                    market_cap: None,
                },
            )]),
            Utc::now(),
        );

        let summary = session.summary(&snapshot);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].name, "Bitcoin");
        assert_eq!(summary[0].symbol, "BTC");
        assert_eq!(summary[0].price, Some(50000.0));
        assert_eq!(summary[0].change_24h, Some(2.5));
        assert_eq!(summary[1].name, "Avalanche");
        assert_eq!(summary[1].price, None);
    }
}
