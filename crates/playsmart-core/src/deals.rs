use std::borrow::Cow;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::quality::DealQuality;
use crate::stores::{store_display_name, StoreId};

/// One raw deal as returned by the deals API: untyped keys and values.
pub type RawDealRecord = serde_json::Map<String, Value>;

/// Column order of a serialized [`Deal`]: identity, prices, rating/quality/store,
/// then everything else. Field declaration order in [`Deal`] matches this.
pub const DEAL_COLUMNS: [&str; 13] = [
    "game_id",
    "title",
    "retail_price",
    "current_price",
    "discount_amount",
    "discount_pct",
    "deal_rating",
    "deal_quality",
    "store",
    "store_id",
    "thumbnail",
    "is_listed",
    "fetched_at",
];

/// A cleaned, enriched deal: one game's current offer at one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub game_id: String,
    pub title: String,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub retail_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    pub current_price: Decimal,
    /// CheapShark's own `savings` figure, passed through untouched.
    #[serde(with = "rust_decimal::serde::str_option")]
    pub discount_amount: Option<Decimal>,
    /// Always defined and never negative; may exceed 100 on anomalous input.
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_pct: Decimal,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub deal_rating: Option<Decimal>,
    pub deal_quality: DealQuality,
    pub store: Option<String>,
    pub store_id: Option<StoreId>,
    pub thumbnail: Option<String>,
    pub is_listed: Option<bool>,
    /// Shared by every deal produced in the same run.
    pub fetched_at: DateTime<Utc>,
}

impl Deal {
    /// Name to show for this deal's retailer.
    ///
    /// Prefers the source-provided store name, then the static ID table,
    /// then `"Store {id}"`, and `"Unknown store"` when neither is present.
    #[must_use]
    pub fn store_label(&self) -> Cow<'_, str> {
        match (&self.store, self.store_id) {
            (Some(name), _) if !name.trim().is_empty() => Cow::Borrowed(name.as_str()),
            (_, Some(id)) => store_display_name(id),
            _ => Cow::Borrowed("Unknown store"),
        }
    }

    /// Reverts this deal to the raw API shape, using the source field names.
    ///
    /// Derived fields (`discount_pct`, `deal_quality`, `fetched_at`) are not
    /// part of the source schema and are omitted.
    #[must_use]
    pub fn to_raw(&self) -> RawDealRecord {
        let decimal = |d: Option<Decimal>| d.map_or(Value::Null, |d| Value::String(d.to_string()));

        let mut raw = RawDealRecord::new();
        raw.insert("gameID".into(), Value::String(self.game_id.clone()));
        raw.insert("title".into(), Value::String(self.title.clone()));
        raw.insert("salePrice".into(), decimal(Some(self.current_price)));
        raw.insert("normalPrice".into(), decimal(self.retail_price));
        raw.insert("savings".into(), decimal(self.discount_amount));
        raw.insert("dealRating".into(), decimal(self.deal_rating));
        raw.insert(
            "storeName".into(),
            self.store.clone().map_or(Value::Null, Value::String),
        );
        raw.insert(
            "storeID".into(),
            self.store_id
                .map_or(Value::Null, |id| Value::String(id.to_string())),
        );
        raw.insert(
            "thumb".into(),
            self.thumbnail.clone().map_or(Value::Null, Value::String),
        );
        raw.insert(
            "isListed".into(),
            self.is_listed.map_or(Value::Null, Value::Bool),
        );
        raw
    }
}
