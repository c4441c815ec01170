//! Batch-level helpers used by the run report and the dashboard views.

use std::collections::HashMap;

use playsmart_core::{Deal, DealQuality};
use rust_decimal::Decimal;

/// Aggregate figures over one processed batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub total_deals: usize,
    /// Mean `discount_pct`, two places; `None` for an empty batch or when the
    /// sum is not representable.
    pub mean_discount_pct: Option<Decimal>,
    pub max_discount_pct: Option<Decimal>,
    /// Non-zero counts per quality, most desirable first.
    pub by_quality: Vec<(DealQuality, usize)>,
    /// Counts per store label, largest first, ties by name.
    pub by_store: Vec<(String, usize)>,
}

/// Keeps deals whose `discount_pct` is at least `min_discount_pct`, in order.
#[must_use]
pub fn filter_by_discount(deals: Vec<Deal>, min_discount_pct: Decimal) -> Vec<Deal> {
    let filtered: Vec<Deal> = deals
        .into_iter()
        .filter(|d| d.discount_pct >= min_discount_pct)
        .collect();
    tracing::info!(
        retained = filtered.len(),
        %min_discount_pct,
        "filtered deals by minimum discount"
    );
    filtered
}

#[must_use]
pub fn summarize(deals: &[Deal]) -> BatchSummary {
    let total_deals = deals.len();

    let max_discount_pct = deals.iter().map(|d| d.discount_pct).max();
    let mean_discount_pct = deals
        .iter()
        .try_fold(Decimal::ZERO, |sum, d| sum.checked_add(d.discount_pct))
        .and_then(|sum| sum.checked_div(Decimal::from(total_deals)))
        .map(|mean| mean.round_dp(2));

    let by_quality = DealQuality::ALL
        .into_iter()
        .map(|q| (q, deals.iter().filter(|d| d.deal_quality == q).count()))
        .filter(|(_, n)| *n > 0)
        .collect();

    let mut store_counts: HashMap<String, usize> = HashMap::new();
    for deal in deals {
        *store_counts.entry(deal.store_label().into_owned()).or_default() += 1;
    }
    let mut by_store: Vec<(String, usize)> = store_counts.into_iter().collect();
    by_store.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    BatchSummary {
        total_deals,
        mean_discount_pct,
        max_discount_pct,
        by_quality,
        by_store,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn deal(id: &str, pct: &str, quality: DealQuality, store_id: u32) -> Deal {
        Deal {
            game_id: id.to_string(),
            title: id.to_string(),
            retail_price: None,
            current_price: Decimal::ONE,
            discount_amount: None,
            discount_pct: pct.parse().unwrap(),
            deal_rating: None,
            deal_quality: quality,
            store: None,
            store_id: Some(store_id),
            thumbnail: None,
            is_listed: None,
            fetched_at: Utc::now(),
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn filter_keeps_inclusive_minimum_in_order() {
        let deals = vec![
            deal("a", "9.99", DealQuality::Minimal, 1),
            deal("b", "10", DealQuality::Moderate, 1),
            deal("c", "80", DealQuality::Exceptional, 1),
        ];
        let kept = filter_by_discount(deals, dec("10"));
        let ids: Vec<&str> = kept.iter().map(|d| d.game_id.as_str()).collect();
        assert_eq!(ids, ["b", "c"]);
    }

    #[test]
    fn summarize_empty_batch() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_deals, 0);
        assert!(summary.mean_discount_pct.is_none());
        assert!(summary.max_discount_pct.is_none());
        assert!(summary.by_quality.is_empty());
        assert!(summary.by_store.is_empty());
    }

    #[test]
    fn summarize_discount_figures() {
        let deals = vec![
            deal("a", "80", DealQuality::Exceptional, 1),
            deal("b", "0", DealQuality::Minimal, 6),
            deal("c", "25.5", DealQuality::Good, 1),
        ];
        let summary = summarize(&deals);
        assert_eq!(summary.total_deals, 3);
        assert_eq!(summary.mean_discount_pct, Some(dec("35.17")));
        assert_eq!(summary.max_discount_pct, Some(dec("80")));
    }

    #[test]
    fn summarize_skips_mean_when_sum_overflows() {
        let huge = "70000000000000000000000000100";
        let deals = vec![
            deal("a", huge, DealQuality::Exceptional, 1),
            deal("b", huge, DealQuality::Exceptional, 1),
        ];
        let summary = summarize(&deals);
        assert_eq!(summary.total_deals, 2);
        assert_eq!(summary.mean_discount_pct, None);
        assert_eq!(summary.max_discount_pct, Some(dec(huge)));
    }

    #[test]
    fn summarize_quality_breakdown_in_desirability_order() {
        let deals = vec![
            deal("a", "0", DealQuality::Minimal, 1),
            deal("b", "80", DealQuality::Exceptional, 1),
            deal("c", "5", DealQuality::Minimal, 1),
        ];
        let summary = summarize(&deals);
        assert_eq!(
            summary.by_quality,
            vec![(DealQuality::Exceptional, 1), (DealQuality::Minimal, 2)]
        );
    }

    #[test]
    fn summarize_store_counts_sorted_by_count_then_name() {
        let deals = vec![
            deal("a", "0", DealQuality::Minimal, 6),
            deal("b", "0", DealQuality::Minimal, 1),
            deal("c", "0", DealQuality::Minimal, 1),
            deal("d", "0", DealQuality::Minimal, 5),
            deal("e", "0", DealQuality::Minimal, 99),
        ];
        let summary = summarize(&deals);
        assert_eq!(
            summary.by_store,
            vec![
                ("Steam".to_string(), 2),
                ("Epic Games Store".to_string(), 1),
                ("GOG".to_string(), 1),
                ("Store 99".to_string(), 1),
            ]
        );
    }
}
