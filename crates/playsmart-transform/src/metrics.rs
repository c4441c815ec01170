//! Discount percentage derived from a retail/current price pair.

use rust_decimal::Decimal;

use crate::normalize::PartialDeal;

/// `(retail - current) / retail * 100`, rounded half-to-even to two places.
///
/// `None` when the retail price is missing or zero, or when any step of the
/// computation is not representable as a `Decimal`. An unrepresentable
/// result is undefined, not saturated, so it also ends up as 0.
#[must_use]
pub fn raw_discount_pct(retail_price: Option<Decimal>, current_price: Decimal) -> Option<Decimal> {
    let retail = retail_price.filter(|r| !r.is_zero())?;
    let pct = retail
        .checked_sub(current_price)?
        .checked_div(retail)?
        .checked_mul(Decimal::ONE_HUNDRED)?;
    Some(pct.round_dp(2))
}

/// Discount percentage with the missing case defaulted to 0 and a floor of 0.
///
/// No ceiling: anomalous source prices can yield values above 100 and those
/// are kept as-is.
#[must_use]
pub fn discount_pct(retail_price: Option<Decimal>, current_price: Decimal) -> Decimal {
    raw_discount_pct(retail_price, current_price)
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
}

/// Fills in `discount_pct` for every record in the batch.
#[must_use]
pub fn with_discount_pct(mut batch: Vec<PartialDeal>) -> Vec<PartialDeal> {
    for deal in &mut batch {
        deal.discount_pct = Some(discount_pct(deal.retail_price, deal.current_price));
    }
    tracing::debug!(records = batch.len(), "calculated discount percentages");
    batch
}
