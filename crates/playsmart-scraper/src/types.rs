//! Response types for CheapShark's `GET /games?id=<id>` endpoint.
//!
//! Observed shape:
//!
//! ```json
//! {
//!   "info": { "title": "LEGO Batman", "steamAppID": "21000", "thumb": "https://…" },
//!   "cheapestPriceEver": { "price": "3.99", "date": 1543028665 },
//!   "deals": [
//!     { "storeID": "1", "dealID": "tyTH8…", "price": "19.99",
//!       "retailPrice": "19.99", "savings": "0.000000" }
//!   ]
//! }
//! ```
//!
//! Prices are decimal strings and are passed through as-is; numeric coercion
//! is the transform stage's job. An unknown ID yields a bare `[]` body rather
//! than a 404.

use playsmart_core::RawDealRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDetail {
    pub info: GameInfo,

    #[serde(rename = "cheapestPriceEver", default)]
    pub cheapest_price_ever: Option<CheapestPrice>,

    /// One entry per store currently selling the game.
    #[serde(default)]
    pub deals: Vec<GameDeal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameInfo {
    pub title: String,

    #[serde(rename = "steamAppID", default)]
    pub steam_app_id: Option<String>,

    #[serde(default)]
    pub thumb: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheapestPrice {
    pub price: String,
    /// Unix timestamp, seconds.
    pub date: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDeal {
    #[serde(rename = "storeID")]
    pub store_id: String,

    #[serde(rename = "dealID")]
    pub deal_id: String,

    pub price: String,

    #[serde(rename = "retailPrice")]
    pub retail_price: String,

    #[serde(default)]
    pub savings: Option<String>,
}

impl GameDetail {
    /// Re-shapes each store offer as a `/deals`-style raw record so it can go
    /// through the same transform as the deals list.
    ///
    /// The games endpoint carries no deal rating, so `dealRating` is absent.
    #[must_use]
    pub fn to_raw_deals(&self, game_id: &str) -> Vec<RawDealRecord> {
        self.deals
            .iter()
            .map(|deal| {
                let mut raw = RawDealRecord::new();
                raw.insert("gameID".into(), Value::String(game_id.to_string()));
                raw.insert("title".into(), Value::String(self.info.title.clone()));
                raw.insert("salePrice".into(), Value::String(deal.price.clone()));
                raw.insert("normalPrice".into(), Value::String(deal.retail_price.clone()));
                if let Some(savings) = &deal.savings {
                    raw.insert("savings".into(), Value::String(savings.clone()));
                }
                raw.insert("storeID".into(), Value::String(deal.store_id.clone()));
                raw.insert("dealID".into(), Value::String(deal.deal_id.clone()));
                if let Some(thumb) = &self.info.thumb {
                    raw.insert("thumb".into(), Value::String(thumb.clone()));
                }
                raw
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_json() -> &'static str {
        r#"{
            "info": {"title": "LEGO Batman", "steamAppID": "21000", "thumb": "https://cdn.example.com/lb.jpg"},
            "cheapestPriceEver": {"price": "3.99", "date": 1543028665},
            "deals": [
                {"storeID": "1", "dealID": "d1", "price": "4.99", "retailPrice": "19.99", "savings": "75.037519"},
                {"storeID": "7", "dealID": "d2", "price": "19.99", "retailPrice": "19.99", "savings": "0.000000"}
            ]
        }"#
    }

    #[test]
    fn deserializes_observed_shape() {
        let detail: GameDetail = serde_json::from_str(detail_json()).unwrap();
        assert_eq!(detail.info.title, "LEGO Batman");
        assert_eq!(detail.info.steam_app_id.as_deref(), Some("21000"));
        assert_eq!(detail.cheapest_price_ever.as_ref().unwrap().date, 1_543_028_665);
        assert_eq!(detail.deals.len(), 2);
        assert_eq!(detail.deals[0].retail_price, "19.99");
    }

    #[test]
    fn tolerates_missing_optional_sections() {
        let detail: GameDetail = serde_json::from_str(r#"{"info": {"title": "Bare"}}"#).unwrap();
        assert!(detail.cheapest_price_ever.is_none());
        assert!(detail.deals.is_empty());
        assert!(detail.info.thumb.is_none());
    }

    #[test]
    fn to_raw_deals_uses_deals_endpoint_field_names() {
        let detail: GameDetail = serde_json::from_str(detail_json()).unwrap();
        let raw = detail.to_raw_deals("612");
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0]["gameID"], Value::String("612".into()));
        assert_eq!(raw[0]["title"], Value::String("LEGO Batman".into()));
        assert_eq!(raw[0]["salePrice"], Value::String("4.99".into()));
        assert_eq!(raw[0]["normalPrice"], Value::String("19.99".into()));
        assert_eq!(raw[1]["storeID"], Value::String("7".into()));
        assert!(!raw[0].contains_key("dealRating"));
    }
}
