//! Presentation order for a batch of deals.

use std::cmp::Ordering;

use playsmart_core::Deal;

/// Orders by `deal_rating` descending, then `discount_pct` descending.
///
/// Deals without a rating sort after every rated deal, whatever their
/// discount; among themselves they still order by discount.
#[must_use]
pub fn compare_deals(a: &Deal, b: &Deal) -> Ordering {
    let by_rating = match (a.deal_rating, b.deal_rating) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_rating.then_with(|| b.discount_pct.cmp(&a.discount_pct))
}

/// Sorts with [`compare_deals`]. The sort is stable: deals with equal keys
/// keep their input order.
#[must_use]
pub fn rank_deals(mut deals: Vec<Deal>) -> Vec<Deal> {
    deals.sort_by(compare_deals);
    tracing::debug!(records = deals.len(), "sorted deals by rating and discount");
    deals
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use playsmart_core::DealQuality;
    use rust_decimal::Decimal;

    use super::*;

    fn deal(id: &str, rating: Option<&str>, pct: &str) -> Deal {
        Deal {
            game_id: id.to_string(),
            title: format!("Game {id}"),
            retail_price: None,
            current_price: Decimal::ONE,
            discount_amount: None,
            discount_pct: pct.parse().unwrap(),
            deal_rating: rating.map(|r| r.parse().unwrap()),
            deal_quality: DealQuality::Minimal,
            store: None,
            store_id: None,
            thumbnail: None,
            is_listed: None,
            fetched_at: Utc::now(),
        }
    }

    fn ids(deals: &[Deal]) -> Vec<&str> {
        deals.iter().map(|d| d.game_id.as_str()).collect()
    }

    #[test]
    fn higher_rating_first() {
        let ranked = rank_deals(vec![
            deal("a", Some("7.0"), "90"),
            deal("b", Some("9.1"), "10"),
            deal("c", Some("8.0"), "50"),
        ]);
        assert_eq!(ids(&ranked), ["b", "c", "a"]);
    }

    #[test]
    fn discount_breaks_rating_ties() {
        let ranked = rank_deals(vec![
            deal("a", Some("8.0"), "20"),
            deal("b", Some("8.0"), "60"),
            deal("c", Some("8.00"), "40"),
        ]);
        assert_eq!(ids(&ranked), ["b", "c", "a"]);
    }

    #[test]
    fn unrated_deals_go_last_regardless_of_discount() {
        let ranked = rank_deals(vec![
            deal("unrated-big", None, "99"),
            deal("rated-small", Some("0.1"), "0"),
            deal("unrated-small", None, "5"),
        ]);
        assert_eq!(ids(&ranked), ["rated-small", "unrated-big", "unrated-small"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let ranked = rank_deals(vec![
            deal("first", Some("8.5"), "50"),
            deal("other", Some("9.0"), "10"),
            deal("second", Some("8.5"), "50"),
            deal("third", Some("8.50"), "50.00"),
            deal("u1", None, "0"),
            deal("u2", None, "0"),
        ]);
        assert_eq!(ids(&ranked), ["other", "first", "second", "third", "u1", "u2"]);
    }

    #[test]
    fn empty_batch() {
        assert!(rank_deals(Vec::new()).is_empty());
    }
}
