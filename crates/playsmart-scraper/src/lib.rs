//! HTTP client for the public CheapShark API.
//!
//! Deals are returned as untyped [`RawDealRecord`]s for the transform stage;
//! the single-game lookup is typed because it is only read here and in the CLI.
//!
//! [`RawDealRecord`]: playsmart_core::RawDealRecord

pub mod client;
pub mod error;
pub mod types;

mod rate_limit;

pub use client::CheapSharkClient;
pub use error::ScraperError;
pub use types::{CheapestPrice, GameDeal, GameDetail, GameInfo};
