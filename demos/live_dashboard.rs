//! Prints live summaries for a few polls, then loads the 7-day history.
//!
//! ```sh
//! CRYPTOLIVE_TARGET=proxy CRYPTOLIVE_BASE_URL=http://127.0.0.1:3000 \
//!     cargo run --example live_dashboard
//! ```

use std::time::Duration;

use cryptolive::prelude::*;
use futures_util::StreamExt;

#[tokio::main]
async fn main() -> Result<(), DashboardError> {
    let client = MarketClientBuilder::from_config(Config::from_env()).build()?;
    let mut dashboard = Dashboard::open(client).await;

    let mut updates = 0;
    {
        let mut events = dashboard.events();
        while let Some(event) = events.next().await {
            if let DashboardEvent::LiveUpdated { at } = event {
                println!("── {} ──", at.format("%H:%M:%S"));
                for entry in dashboard.summary().await {
                    println!(
                        "{:<6} {:>14}  {}",
                        entry.symbol,
                        format_usd(entry.price),
                        format_change(entry.change_24h)
                    );
                }
                updates += 1;
                if updates == 3 {
                    break;
                }
            }
        }
    }

    dashboard.select_range(TimeRange::Week).await;
    dashboard.settle().await;

    if let Some(banner) = dashboard.banner().await {
        println!("{}: {}", banner.kind, banner.message);
        dashboard.back_to_live().await;
        tokio::time::sleep(Duration::from_secs(1)).await;
    } else {
        for asset in dashboard.session().assets() {
            let points = dashboard.series(&asset.id).await;
            match (points.first(), points.last()) {
                (Some(first), Some(last)) => println!(
                    "{:<6} {} → {}  {} → {}",
                    asset.symbol,
                    first.display_time,
                    last.display_time,
                    format_usd(Some(first.price)),
                    format_usd(Some(last.price))
                ),
                _ => println!("{:<6} no data", asset.symbol),
            }
        }
    }

    dashboard.shutdown().await;
    Ok(())
}
