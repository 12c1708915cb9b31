//! Wire → domain conversion for market metadata.

use super::wire::MarketsResponse;
use super::MarketInfo;
use crate::shared::AssetId;
use std::collections::HashMap;

/// Key the markets array by asset id.
pub fn market_info_from_wire(resp: MarketsResponse) -> HashMap<AssetId, MarketInfo> {
    resp.into_iter()
        .map(|m| {
            (
                AssetId::from(m.id),
                MarketInfo {
                    symbol: m.symbol.to_uppercase(),
                    image: m.image,
                    name: m.name,
                    current_price: m.current_price,
                    market_cap_rank: m.market_cap_rank,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_by_id_and_uppercases_symbol() {
        let resp: MarketsResponse = serde_json::from_str(
            r#"[
                {"id":"bitcoin","symbol":"btc","name":"Bitcoin","image":"https://img/btc.png","current_price":50000,"market_cap_rank":1},
                {"id":"ethereum","symbol":"eth"}
            ]"#,
        )
        .unwrap();
        let info = market_info_from_wire(resp);
        assert_eq!(info.len(), 2);
        let btc = &info[&AssetId::from("bitcoin")];
        assert_eq!(btc.symbol, "BTC");
        assert_eq!(btc.image.as_deref(), Some("https://img/btc.png"));
        assert_eq!(btc.market_cap_rank, Some(1));
        assert_eq!(info[&AssetId::from("ethereum")].image, None);
    }
}
