//! Snapshot state container — app-owned, replaced per live tick.

use super::Quote;
use crate::shared::AssetId;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Latest known quote per asset.
///
/// A tick overwrites the quotes it carries; assets it omits keep their
/// previous (now stale) value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    quotes: HashMap<AssetId, Quote>,
    updated_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_tick(&mut self, quotes: HashMap<AssetId, Quote>, at: DateTime<Utc>) {
        self.quotes.extend(quotes);
        self.updated_at = Some(at);
    }

    pub fn get(&self, id: &AssetId) -> Option<&Quote> {
        self.quotes.get(id)
    }

    pub fn quotes(&self) -> &HashMap<AssetId, Quote> {
        &self.quotes
    }

    /// Time of the last successful tick.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
