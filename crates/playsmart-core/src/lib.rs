//! Shared domain types and configuration for PlaySmart.
//!
//! Everything here is free of I/O apart from [`load_app_config`], which reads
//! the process environment.

pub mod app_config;
pub mod config;
pub mod deals;
pub mod quality;
pub mod stores;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use deals::{Deal, RawDealRecord, DEAL_COLUMNS};
pub use quality::DealQuality;
pub use stores::{store_display_name, store_name, StoreId};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
