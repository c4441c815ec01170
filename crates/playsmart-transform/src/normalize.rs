//! Raw CheapShark deal records to [`PartialDeal`]s.
//!
//! Source records are untyped JSON maps. Prices arrive as decimal strings
//! (`"19.99"`) from the live API but may be plain JSON numbers from other
//! producers; both are accepted. Anything that does not parse as a number
//! becomes `None`, never zero.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use playsmart_core::{Deal, DealQuality, RawDealRecord, StoreId};
use rust_decimal::Decimal;
use serde_json::Value;

/// Recognized source fields and their canonical names. Any other key in a
/// raw record is ignored.
pub const FIELD_MAP: [(&str, &str); 10] = [
    ("gameID", "game_id"),
    ("title", "title"),
    ("salePrice", "current_price"),
    ("normalPrice", "retail_price"),
    ("savings", "discount_amount"),
    ("dealRating", "deal_rating"),
    ("storeName", "store"),
    ("storeID", "store_id"),
    ("thumb", "thumbnail"),
    ("isListed", "is_listed"),
];

/// A normalized record whose derived fields may not be filled in yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialDeal {
    pub game_id: String,
    pub title: String,
    pub current_price: Decimal,
    pub retail_price: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
    pub deal_rating: Option<Decimal>,
    pub store: Option<String>,
    pub store_id: Option<StoreId>,
    pub thumbnail: Option<String>,
    pub is_listed: Option<bool>,
    /// Set by [`crate::metrics::with_discount_pct`].
    pub discount_pct: Option<Decimal>,
    /// Set by [`crate::classify::with_deal_quality`].
    pub deal_quality: Option<DealQuality>,
}

impl PartialDeal {
    /// Finalizes into a [`Deal`] stamped with the run timestamp.
    ///
    /// A missing or negative `discount_pct` becomes zero; a missing quality is
    /// classified from that final percentage.
    #[must_use]
    pub fn into_deal(self, fetched_at: DateTime<Utc>) -> Deal {
        let discount_pct = self.discount_pct.unwrap_or(Decimal::ZERO).max(Decimal::ZERO);
        let deal_quality = self
            .deal_quality
            .unwrap_or_else(|| DealQuality::classify(Some(discount_pct)));

        Deal {
            game_id: self.game_id,
            title: self.title,
            retail_price: self.retail_price,
            current_price: self.current_price,
            discount_amount: self.discount_amount,
            discount_pct,
            deal_rating: self.deal_rating,
            deal_quality,
            store: self.store,
            store_id: self.store_id,
            thumbnail: self.thumbnail,
            is_listed: self.is_listed,
            fetched_at,
        }
    }
}

/// Required field that was absent or unusable, causing a record to be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    GameId,
    Title,
    CurrentPrice,
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingField::GameId => write!(f, "game_id"),
            MissingField::Title => write!(f, "title"),
            MissingField::CurrentPrice => write!(f, "current_price"),
        }
    }
}

/// Per-reason count of records dropped by [`normalize_batch`].
///
/// A record missing several required fields is counted once, under the
/// first of `game_id`, `title`, `current_price` that is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropCounts {
    pub missing_game_id: usize,
    pub missing_title: usize,
    pub missing_current_price: usize,
}

impl DropCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.missing_game_id + self.missing_title + self.missing_current_price
    }

    fn record(&mut self, field: MissingField) {
        match field {
            MissingField::GameId => self.missing_game_id += 1,
            MissingField::Title => self.missing_title += 1,
            MissingField::CurrentPrice => self.missing_current_price += 1,
        }
    }
}

/// Output of [`normalize_batch`]: retained records in input order plus what
/// was filtered out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub deals: Vec<PartialDeal>,
    pub dropped: DropCounts,
}

/// Normalizes a whole batch, dropping records that lack a required field.
///
/// Dropping is not an error. The counts are returned and logged at `warn`
/// when anything was filtered.
#[must_use]
pub fn normalize_batch(raw: &[RawDealRecord]) -> Normalized {
    let mut out = Normalized {
        deals: Vec::with_capacity(raw.len()),
        dropped: DropCounts::default(),
    };

    for record in raw {
        match normalize_record(record) {
            Ok(deal) => out.deals.push(deal),
            Err(field) => {
                tracing::debug!(
                    missing = %field,
                    "dropping deal record with missing required field"
                );
                out.dropped.record(field);
            }
        }
    }

    if out.dropped.total() > 0 {
        tracing::warn!(
            dropped = out.dropped.total(),
            missing_game_id = out.dropped.missing_game_id,
            missing_title = out.dropped.missing_title,
            missing_current_price = out.dropped.missing_current_price,
            "dropped incomplete deal records"
        );
    }
    tracing::info!(retained = out.deals.len(), "deal records normalized");

    out
}

/// Normalizes one raw record.
///
/// # Errors
///
/// Returns the first required field (`game_id`, `title`, `current_price`)
/// that is missing or cannot be coerced.
pub fn normalize_record(raw: &RawDealRecord) -> Result<PartialDeal, MissingField> {
    let game_id = source(raw, "game_id")
        .and_then(coerce_text)
        .ok_or(MissingField::GameId)?;
    let title = source(raw, "title")
        .and_then(coerce_text)
        .ok_or(MissingField::Title)?;
    let current_price = source(raw, "current_price")
        .and_then(coerce_decimal)
        .ok_or(MissingField::CurrentPrice)?;

    Ok(PartialDeal {
        game_id,
        title,
        current_price,
        retail_price: source(raw, "retail_price").and_then(coerce_decimal),
        discount_amount: source(raw, "discount_amount").and_then(coerce_decimal),
        deal_rating: source(raw, "deal_rating").and_then(coerce_decimal),
        store: source(raw, "store").and_then(coerce_text),
        store_id: source(raw, "store_id").and_then(coerce_store_id),
        thumbnail: source(raw, "thumbnail").and_then(coerce_text),
        is_listed: source(raw, "is_listed").and_then(coerce_flag),
        discount_pct: None,
        deal_quality: None,
    })
}

/// Looks up the raw value for a canonical field through [`FIELD_MAP`].
fn source<'a>(raw: &'a RawDealRecord, canonical: &str) -> Option<&'a Value> {
    FIELD_MAP
        .iter()
        .find(|(_, name)| *name == canonical)
        .and_then(|(src, _)| raw.get(*src))
}

/// Strings are trimmed; blank strings count as missing. Numbers are rendered
/// as text so numeric IDs survive.
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    }
}

/// Accepts plain (`"19.99"`) and scientific (`"1.5e3"`) notation.
fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn coerce_store_id(value: &Value) -> Option<StoreId> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|id| StoreId::try_from(id).ok()),
        Value::String(s) => s.trim().parse::<StoreId>().ok(),
        _ => None,
    }
}

/// CheapShark sends flags as `"0"`/`"1"` strings.
fn coerce_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
