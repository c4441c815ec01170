//! `playsmart run`: fetch → save raw → transform → save processed → summary.

use std::path::Path;

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use playsmart_core::AppConfig;
use playsmart_scraper::CheapSharkClient;
use playsmart_store::SummaryContext;
use playsmart_transform::TransformError;

/// Runs one pipeline pass stamped with `started_at`.
///
/// The raw batch is saved as soon as it is fetched. Nothing is written to the
/// processed directory unless the transform yields at least one deal.
///
/// # Errors
///
/// Returns an error if the fetch fails, the transform yields no deals, or
/// any file cannot be written.
pub(crate) async fn run_pipeline(
    config: &AppConfig,
    started_at: DateTime<Utc>,
    log_file: Option<&Path>,
) -> anyhow::Result<()> {
    tracing::info!(
        base_url = %config.api_base_url,
        sort_by = %config.sort_by,
        max_deals = config.max_deals,
        "pipeline run started"
    );

    let client = CheapSharkClient::from_config(config)?;
    let raw = client
        .fetch_deals(&config.sort_by, config.max_deals)
        .await
        .context("failed to fetch deals from CheapShark")?;

    playsmart_store::save_raw_batch(&config.raw_dir, &raw, started_at)?;

    let deals = match playsmart_transform::try_run_at(&raw, started_at) {
        Ok(deals) => deals,
        Err(TransformError::EmptyInput) => {
            bail!("CheapShark returned no deals; nothing to process")
        }
    };
    if deals.is_empty() {
        bail!(
            "all {} fetched records were incomplete; nothing persisted",
            raw.len()
        );
    }

    let processed = playsmart_store::save_processed(&config.processed_dir, &deals, started_at)?;

    let summary = playsmart_transform::summarize(&deals);
    let ctx = SummaryContext {
        executed_at: started_at,
        raw_dir: &config.raw_dir,
        processed_dir: &config.processed_dir,
        log_file,
    };
    let report = playsmart_store::write_summary_report(&ctx, &summary)?;

    println!("processed {} deals → {}", summary.total_deals, processed.display());
    if let (Some(mean), Some(max)) = (summary.mean_discount_pct, summary.max_discount_pct) {
        println!("average discount {mean:.2}%, best {max:.2}%");
    }
    println!("summary written to {}", report.display());

    tracing::info!(
        deals = summary.total_deals,
        dropped = raw.len().saturating_sub(deals.len()),
        "pipeline run complete"
    );
    Ok(())
}
