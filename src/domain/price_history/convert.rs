//! Wire → domain conversion for historical series.

use super::wire::MarketChartResponse;
use super::PricePoint;
use crate::shared::fmt::{format_display_time, Granularity};

/// Prices and timestamps are copied verbatim; only the label is derived.
/// Null prices are skipped.
pub fn series_from_wire(resp: MarketChartResponse, granularity: Granularity) -> Vec<PricePoint> {
    let mut points: Vec<PricePoint> = resp
        .prices
        .into_iter()
        .filter_map(|(ts, price)| {
            let price = price?;
            let timestamp = ts as i64;
            Some(PricePoint {
                timestamp,
                price,
                display_time: format_display_time(timestamp, granularity),
            })
        })
        .collect();
    // Series must be non-decreasing by timestamp.
    points.sort_by_key(|p| p.timestamp);
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_points() {
        let resp: MarketChartResponse = serde_json::from_str(
            r#"{"prices":[[1699920000000,36500.123456789],[1700006400000,37100.5]],"total_volumes":[]}"#,
        )
        .unwrap();
        let points = series_from_wire(resp, Granularity::Date);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].timestamp, 1_699_920_000_000);
        assert_eq!(points[0].price, 36500.123456789);
        assert_eq!(points[0].display_time, "Nov 14");
        assert_eq!(points[1].display_time, "Nov 15");
    }

    #[test]
    fn test_hourly_labels_include_time() {
        let resp = MarketChartResponse {
            prices: vec![(1_700_000_000_000.0, Some(1.0))],
        };
        let points = series_from_wire(resp, Granularity::DateTime);
        assert_eq!(points[0].display_time, "Nov 14, 22:13");
    }

    #[test]
    fn test_out_of_order_input_is_sorted() {
        let resp = MarketChartResponse {
            prices: vec![(2000.0, Some(2.0)), (1000.0, Some(1.0))],
        };
        let points = series_from_wire(resp, Granularity::Date);
        assert_eq!(points[0].timestamp, 1000);
        assert_eq!(points[1].timestamp, 2000);
    }

    #[test]
    fn test_null_prices_are_skipped() {
        let resp: MarketChartResponse = serde_json::from_str(
            r#"{"prices":[[1699920000000,36500.0],[1700006400000,null],[1700092800000,37000.0]]}"#,
        )
        .unwrap();
        let points = series_from_wire(resp, Granularity::Date);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].price, 36500.0);
        assert_eq!(points[1].display_time, "Nov 16");
    }

    #[test]
    fn test_missing_prices_is_a_decode_error() {
        assert!(serde_json::from_str::<MarketChartResponse>(r#"{"error":"coin not found"}"#).is_err());
    }
}
