//! Transform orchestration: raw batch in, ranked deals out.

use chrono::{DateTime, Utc};
use playsmart_core::{Deal, RawDealRecord};

use crate::classify::with_deal_quality;
use crate::error::TransformError;
use crate::metrics::with_discount_pct;
use crate::normalize::normalize_batch;
use crate::rank::rank_deals;

/// Runs the full transform, stamping the batch with the current time.
///
/// An empty input is logged as a warning and yields an empty output; use
/// [`try_run`] to receive [`TransformError::EmptyInput`] instead.
#[must_use]
pub fn run(raw: &[RawDealRecord]) -> Vec<Deal> {
    run_at(raw, Utc::now())
}

/// Like [`run`] with an explicit run timestamp.
#[must_use]
pub fn run_at(raw: &[RawDealRecord], fetched_at: DateTime<Utc>) -> Vec<Deal> {
    match try_run_at(raw, fetched_at) {
        Ok(deals) => deals,
        Err(err) => {
            tracing::warn!(error = %err, "skipping deal transformation");
            Vec::new()
        }
    }
}

/// Fallible form of [`run`].
///
/// # Errors
///
/// Returns [`TransformError::EmptyInput`] when `raw` is empty.
pub fn try_run(raw: &[RawDealRecord]) -> Result<Vec<Deal>, TransformError> {
    try_run_at(raw, Utc::now())
}

/// Normalize, derive discount, classify, stamp `fetched_at`, rank.
///
/// Every returned deal carries the same `fetched_at`. Records dropped during
/// normalization are counted and logged, not reported as errors, so a
/// non-empty input can still produce an empty output.
///
/// # Errors
///
/// Returns [`TransformError::EmptyInput`] when `raw` is empty.
pub fn try_run_at(
    raw: &[RawDealRecord],
    fetched_at: DateTime<Utc>,
) -> Result<Vec<Deal>, TransformError> {
    if raw.is_empty() {
        return Err(TransformError::EmptyInput);
    }
    tracing::info!(records = raw.len(), "starting deal transformation");

    let normalized = normalize_batch(raw);
    let priced = with_discount_pct(normalized.deals);
    let classified = with_deal_quality(priced);

    let stamped: Vec<Deal> = classified
        .into_iter()
        .map(|partial| partial.into_deal(fetched_at))
        .collect();

    let ranked = rank_deals(stamped);

    tracing::info!(
        input = raw.len(),
        output = ranked.len(),
        dropped = normalized.dropped.total(),
        %fetched_at,
        "deal transformation complete"
    );
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};

    use super::*;

    fn raw(value: Value) -> RawDealRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture must be a JSON object, got {other}"),
        }
    }

    fn run_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_input_is_an_error_for_try_run() {
        assert_eq!(try_run_at(&[], run_time()), Err(TransformError::EmptyInput));
    }

    #[test]
    fn empty_input_yields_empty_output_for_run() {
        assert!(run_at(&[], run_time()).is_empty());
        assert!(run(&[]).is_empty());
    }

    #[test]
    fn all_records_dropped_is_empty_but_not_an_error() {
        let batch = vec![raw(json!({"title": "no id", "salePrice": "1"}))];
        assert_eq!(try_run_at(&batch, run_time()), Ok(Vec::new()));
    }

    #[test]
    fn every_deal_shares_the_run_timestamp() {
        let batch = vec![
            raw(json!({"gameID": "1", "title": "A", "salePrice": "1", "normalPrice": "2"})),
            raw(json!({"gameID": "2", "title": "B", "salePrice": "3", "normalPrice": "4"})),
        ];
        let deals = run_at(&batch, run_time());
        assert_eq!(deals.len(), 2);
        assert!(deals.iter().all(|d| d.fetched_at == run_time()));
    }

    #[test]
    fn zero_retail_price_yields_zero_discount() {
        let batch = vec![raw(json!({
            "gameID": "9", "title": "Z", "salePrice": 5, "normalPrice": 0
        }))];
        let deals = run_at(&batch, run_time());
        assert_eq!(deals[0].discount_pct, Decimal::ZERO);
    }
}
