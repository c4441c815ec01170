//! `playsmart game <id>`: one game's offers across stores.

use anyhow::Context;
use chrono::DateTime;
use playsmart_core::AppConfig;
use playsmart_scraper::{CheapSharkClient, ScraperError};

/// Looks the game up live and prints its offers, best first.
///
/// Offers go through the same transform as the deals list, so prices,
/// discounts and quality badges are computed identically.
///
/// # Errors
///
/// Returns an error if the ID is unknown or the request fails.
pub(crate) async fn run_game(config: &AppConfig, game_id: &str) -> anyhow::Result<()> {
    let client = CheapSharkClient::from_config(config)?;
    let detail = match client.fetch_game(game_id).await {
        Ok(detail) => detail,
        Err(ScraperError::GameNotFound { .. }) => {
            anyhow::bail!("no game with id '{game_id}' on CheapShark")
        }
        Err(e) => return Err(e).context("failed to look up game"),
    };

    println!("{}", detail.info.title);
    if let Some(cheapest) = &detail.cheapest_price_ever {
        let when = DateTime::from_timestamp(cheapest.date, 0)
            .map_or_else(|| "unknown date".to_string(), |d| d.format("%Y-%m-%d").to_string());
        println!("cheapest ever: ${} ({when})", cheapest.price);
    }
    println!();

    let offers = playsmart_transform::run(&detail.to_raw_deals(game_id));
    if offers.is_empty() {
        println!("no current offers");
        return Ok(());
    }

    for (i, offer) in offers.iter().enumerate() {
        println!("{}", crate::dashboard::format_deal_row(i + 1, offer));
    }
    Ok(())
}
