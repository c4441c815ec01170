//! The deal transform core: raw API records in, clean ranked [`Deal`]s out.
//!
//! Stages run in a fixed order, each a plain function over the batch:
//!
//! 1. [`normalize_batch`]: rename, coerce, drop incomplete records.
//! 2. [`with_discount_pct`]: derive the discount percentage.
//! 3. [`with_deal_quality`]: bucket the discount into a [`DealQuality`].
//! 4. stamp `fetched_at` once for the batch.
//! 5. [`rank_deals`]: stable sort by rating, then discount.
//!
//! [`run`] composes them. Nothing here performs I/O.
//!
//! [`Deal`]: playsmart_core::Deal
//! [`DealQuality`]: playsmart_core::DealQuality

pub mod classify;
pub mod error;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod rank;
pub mod summary;

pub use classify::with_deal_quality;
pub use error::TransformError;
pub use metrics::{discount_pct, with_discount_pct};
pub use normalize::{
    normalize_batch, normalize_record, DropCounts, MissingField, Normalized, PartialDeal,
};
pub use pipeline::{run, run_at, try_run, try_run_at};
pub use rank::{compare_deals, rank_deals};
pub use summary::{filter_by_discount, summarize, BatchSummary};
