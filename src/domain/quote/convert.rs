//! Wire → domain conversion for quotes.

use super::wire::SimplePriceResponse;
use super::Quote;
use crate::shared::AssetId;
use std::collections::HashMap;

/// Entries without a USD price carry nothing to chart and are dropped.
pub fn quotes_from_wire(resp: SimplePriceResponse) -> HashMap<AssetId, Quote> {
    resp.into_iter()
        .filter_map(|(id, entry)| {
            let price_usd = entry.usd?;
            Some((
                AssetId::from(id),
                Quote {
                    price_usd,
                    change_24h_pct: entry.usd_24h_change,
                    volume_24h: entry.usd_24h_vol,
                    market_cap: entry.usd_market_cap,
                },
            ))
        })
        .collect()
}
