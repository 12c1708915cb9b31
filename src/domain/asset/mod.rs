//! Asset domain — catalog metadata, display colors, the tracked set.

pub mod catalog;
pub mod palette;

use crate::error::DashboardError;
use crate::shared::AssetId;
use serde::{Deserialize, Serialize};

pub use catalog::{search, KNOWN_ASSETS};
pub use palette::{default_color, random_color, PALETTE};

/// A tracked cryptocurrency as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    pub symbol: String,
    pub color: String,
}

impl Asset {
    /// Resolve display metadata for `id` from the catalog, falling back to the
    /// raw id and an initials-derived symbol for unknown assets.
    pub fn resolve(id: &AssetId, color: &str) -> Self {
        Self {
            id: id.clone(),
            name: catalog::display_name(id),
            symbol: catalog::display_symbol(id),
            color: color.to_string(),
        }
    }
}

// ─── TrackedAssets ───────────────────────────────────────────────────────────

/// Insertion-ordered set of tracked asset ids. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrackedAssets(Vec<AssetId>);

impl TrackedAssets {
    /// Build from a list, dropping duplicates (first occurrence wins).
    pub fn new(ids: impl IntoIterator<Item = AssetId>) -> Result<Self, DashboardError> {
        let mut tracked = Vec::new();
        for id in ids {
            if !tracked.contains(&id) {
                tracked.push(id);
            }
        }
        if tracked.is_empty() {
            return Err(DashboardError::Validation(
                "tracked asset set cannot be empty".to_string(),
            ));
        }
        Ok(Self(tracked))
    }

    /// The six assets shown on first start.
    pub fn defaults() -> Self {
        Self(
            catalog::DEFAULT_ASSETS
                .iter()
                .map(|id| AssetId::from(*id))
                .collect(),
        )
    }

    /// Returns `false` if `id` was already tracked.
    pub fn insert(&mut self, id: AssetId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    /// Returns `Ok(false)` if `id` was not tracked. Removing the last asset is
    /// rejected and leaves the set untouched.
    pub fn remove(&mut self, id: &AssetId) -> Result<bool, DashboardError> {
        let Some(pos) = self.0.iter().position(|t| t == id) else {
            return Ok(false);
        };
        if self.0.len() <= 1 {
            return Err(DashboardError::LastAsset);
        }
        self.0.remove(pos);
        Ok(true)
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        self.0.contains(id)
    }

    pub fn as_slice(&self) -> &[AssetId] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssetId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for TrackedAssets {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let ids = Vec::<AssetId>::deserialize(deserializer)?;
        Self::new(ids).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a TrackedAssets {
    type Item = &'a AssetId;
    type IntoIter = std::slice::Iter<'a, AssetId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracked(ids: &[&str]) -> TrackedAssets {
        TrackedAssets::new(ids.iter().map(|s| AssetId::from(*s))).unwrap()
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(TrackedAssets::new(Vec::new()).is_err());
    }

    #[test]
    fn test_new_dedups_preserving_order() {
        let t = tracked(&["ethereum", "bitcoin", "ethereum"]);
        let ids: Vec<_> = t.iter().map(AssetId::as_str).collect();
        assert_eq!(ids, ["ethereum", "bitcoin"]);
    }

    #[test]
    fn test_insert_is_noop_when_tracked() {
        let mut t = tracked(&["bitcoin"]);
        assert!(!t.insert(AssetId::from("bitcoin")));
        assert!(t.insert(AssetId::from("solana")));
        assert_eq!(t.len(), 2);
        assert_eq!(t.as_slice()[1].as_str(), "solana");
    }

    #[test]
    fn test_remove_last_is_rejected_without_mutation() {
        let mut t = tracked(&["bitcoin"]);
        let err = t.remove(&AssetId::from("bitcoin")).unwrap_err();
        assert!(matches!(err, DashboardError::LastAsset));
        assert_eq!(t, tracked(&["bitcoin"]));
    }

    #[test]
    fn test_remove_untracked_is_noop() {
        let mut t = tracked(&["bitcoin", "ethereum"]);
        assert!(!t.remove(&AssetId::from("dogecoin")).unwrap());
        assert!(t.remove(&AssetId::from("bitcoin")).unwrap());
        assert_eq!(t, tracked(&["ethereum"]));
    }

    #[test]
    fn test_serde_rejects_empty_list() {
        assert!(serde_json::from_str::<TrackedAssets>("[]").is_err());
        let t: TrackedAssets = serde_json::from_str(r#"["bitcoin","cardano"]"#).unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), r#"["bitcoin","cardano"]"#);
    }

    #[test]
    fn test_resolve_unknown_asset() {
        let asset = Asset::resolve(&AssetId::from("wrapped-bitcoin"), "#000000");
        assert_eq!(asset.name, "wrapped-bitcoin");
        assert_eq!(asset.symbol, "WB");
    }

    #[test]
    fn test_defaults() {
        let t = TrackedAssets::defaults();
        assert_eq!(t.len(), 6);
        assert_eq!(t.as_slice()[0].as_str(), "bitcoin");
    }
}
