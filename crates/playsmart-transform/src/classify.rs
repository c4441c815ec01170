//! Batch step assigning a [`DealQuality`] from each record's discount.

use playsmart_core::DealQuality;

use crate::normalize::PartialDeal;

/// Sets `deal_quality` on every record from its `discount_pct`.
///
/// Records that have not been through [`crate::metrics::with_discount_pct`]
/// classify as [`DealQuality::Unknown`].
#[must_use]
pub fn with_deal_quality(mut batch: Vec<PartialDeal>) -> Vec<PartialDeal> {
    for deal in &mut batch {
        deal.deal_quality = Some(DealQuality::classify(deal.discount_pct));
    }
    tracing::debug!(records = batch.len(), "categorized deal qualities");
    batch
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn partial(discount_pct: Option<&str>) -> PartialDeal {
        PartialDeal {
            game_id: "1".to_string(),
            title: "X".to_string(),
            current_price: Decimal::from(10),
            retail_price: None,
            discount_amount: None,
            deal_rating: None,
            store: None,
            store_id: None,
            thumbnail: None,
            is_listed: None,
            discount_pct: discount_pct.map(|s| s.parse().unwrap()),
            deal_quality: None,
        }
    }

    #[test]
    fn assigns_quality_from_discount() {
        let batch = vec![
            partial(Some("80")),
            partial(Some("75")),
            partial(Some("74.99")),
            partial(Some("30")),
            partial(Some("10")),
            partial(Some("0")),
        ];
        let qualities: Vec<_> = with_deal_quality(batch)
            .into_iter()
            .map(|d| d.deal_quality.unwrap())
            .collect();
        assert_eq!(
            qualities,
            [
                DealQuality::Exceptional,
                DealQuality::Exceptional,
                DealQuality::Excellent,
                DealQuality::Good,
                DealQuality::Moderate,
                DealQuality::Minimal,
            ]
        );
    }

    #[test]
    fn missing_discount_is_unknown() {
        let out = with_deal_quality(vec![partial(None)]);
        assert_eq!(out[0].deal_quality, Some(DealQuality::Unknown));
    }
}
