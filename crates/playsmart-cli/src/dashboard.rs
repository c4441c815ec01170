//! Read-only terminal views over the latest processed file.

use std::collections::HashMap;

use playsmart_core::{AppConfig, Deal};
use rust_decimal::Decimal;

/// Row filters for `playsmart show`.
#[derive(Debug, Clone, Default)]
pub(crate) struct ShowFilter {
    pub min_discount: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub limit: usize,
}

/// Aggregate figures for one store in `playsmart stores`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StoreStats {
    pub store: String,
    pub deals: usize,
    /// `None` when the sum is not representable.
    pub mean_discount_pct: Option<Decimal>,
    pub max_discount_pct: Decimal,
    pub mean_price: Option<Decimal>,
}

const TITLE_WIDTH: usize = 40;

fn no_data_message(config: &AppConfig) -> String {
    format!(
        "no processed deals found in {}; run `playsmart run` first",
        config.processed_dir.display()
    )
}

/// Applies discount and price filters, keeping rank order. `limit` is not
/// applied here so headline figures cover every matching deal.
pub(crate) fn apply_filters(deals: Vec<Deal>, filter: &ShowFilter) -> Vec<Deal> {
    let deals = match filter.min_discount {
        Some(min) => playsmart_transform::filter_by_discount(deals, min),
        None => deals,
    };
    match filter.max_price {
        Some(max) => deals.into_iter().filter(|d| d.current_price <= max).collect(),
        None => deals,
    }
}

fn mean(values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    let (sum, count) = values.fold((Some(Decimal::ZERO), 0u32), |(s, n), v| {
        (s.and_then(|s| s.checked_add(v)), n + 1)
    });
    sum?.checked_div(Decimal::from(count)).map(|m| m.round_dp(2))
}

fn percent(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}%"))
}

/// Per-store statistics, most deals first, ties by store name.
pub(crate) fn store_stats(deals: &[Deal]) -> Vec<StoreStats> {
    let mut groups: HashMap<String, Vec<&Deal>> = HashMap::new();
    for deal in deals {
        groups
            .entry(deal.store_label().into_owned())
            .or_default()
            .push(deal);
    }

    let mut stats: Vec<StoreStats> = groups
        .into_iter()
        .map(|(store, group)| StoreStats {
            deals: group.len(),
            mean_discount_pct: mean(group.iter().map(|d| d.discount_pct)),
            max_discount_pct: group
                .iter()
                .map(|d| d.discount_pct)
                .max()
                .unwrap_or(Decimal::ZERO),
            mean_price: mean(group.iter().map(|d| d.current_price)),
            store,
        })
        .collect();
    stats.sort_by(|a, b| b.deals.cmp(&a.deals).then_with(|| a.store.cmp(&b.store)));
    stats
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

fn money(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("${v:.2}"))
}

/// One table row for `show`, without the trailing newline.
pub(crate) fn format_deal_row(rank: usize, deal: &Deal) -> String {
    format!(
        "{:>3}  {:<width$}  {:<20}  {:>8}  {:>8}  {:>7}  {:>6}  {}",
        rank,
        truncate(&deal.title, TITLE_WIDTH),
        truncate(&deal.store_label(), 20),
        money(Some(deal.current_price)),
        money(deal.retail_price),
        format!("{:.2}%", deal.discount_pct),
        deal.deal_rating
            .map_or_else(|| "-".to_string(), |r| r.to_string()),
        deal.deal_quality.badge_label(),
        width = TITLE_WIDTH,
    )
}

/// `playsmart show`
///
/// # Errors
///
/// Returns an error if the latest processed file cannot be read.
pub(crate) fn run_show(config: &AppConfig, filter: &ShowFilter) -> anyhow::Result<()> {
    let Some((path, deals)) = playsmart_store::load_latest(&config.processed_dir)? else {
        println!("{}", no_data_message(config));
        return Ok(());
    };

    let deals = apply_filters(deals, filter);
    let summary = playsmart_transform::summarize(&deals);

    println!("source: {}", path.display());
    if let Some(fetched_at) = deals.first().map(|d| d.fetched_at) {
        println!("fetched: {}", fetched_at.format("%Y-%m-%d %H:%M UTC"));
    }
    println!(
        "deals: {}   average discount: {}   best discount: {}",
        summary.total_deals,
        percent(summary.mean_discount_pct),
        percent(summary.max_discount_pct),
    );
    println!();

    if deals.is_empty() {
        println!("no deals match the given filters");
        return Ok(());
    }

    println!(
        "{:>3}  {:<width$}  {:<20}  {:>8}  {:>8}  {:>7}  {:>6}  QUALITY",
        "#",
        "TITLE",
        "STORE",
        "PRICE",
        "RETAIL",
        "OFF",
        "RATING",
        width = TITLE_WIDTH,
    );
    for (i, deal) in deals.iter().take(filter.limit).enumerate() {
        println!("{}", format_deal_row(i + 1, deal));
    }
    if deals.len() > filter.limit {
        println!("… {} more", deals.len() - filter.limit);
    }

    Ok(())
}

/// `playsmart stores`
///
/// # Errors
///
/// Returns an error if the latest processed file cannot be read.
pub(crate) fn run_stores(config: &AppConfig) -> anyhow::Result<()> {
    let Some((path, deals)) = playsmart_store::load_latest(&config.processed_dir)? else {
        println!("{}", no_data_message(config));
        return Ok(());
    };

    println!("source: {}", path.display());
    println!(
        "{:<24}{:>7}{:>12}{:>12}{:>12}",
        "STORE", "DEALS", "AVG OFF", "MAX OFF", "AVG PRICE"
    );
    for s in store_stats(&deals) {
        println!(
            "{:<24}{:>7}{:>12}{:>12}{:>12}",
            truncate(&s.store, 23),
            s.deals,
            percent(s.mean_discount_pct),
            percent(Some(s.max_discount_pct)),
            money(s.mean_price),
        );
    }

    Ok(())
}
