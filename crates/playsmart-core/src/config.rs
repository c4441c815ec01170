use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional. The lookup is injected so tests can drive it
/// from a plain `HashMap` without `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let env = parse_environment(&or_default("PLAYSMART_ENV", "development"))?;
    let log_level = or_default("PLAYSMART_LOG_LEVEL", "info");
    let log_dir = optional("PLAYSMART_LOG_DIR").map(PathBuf::from);

    let api_base_url = or_default(
        "PLAYSMART_API_BASE_URL",
        "https://www.cheapshark.com/api/1.0",
    )
    .trim_end_matches('/')
    .to_string();
    let sort_by = or_default("PLAYSMART_SORT_BY", "Savings");

    let max_deals: u32 = parse_number(
        &or_default("PLAYSMART_MAX_DEALS", "100"),
        "PLAYSMART_MAX_DEALS",
    )?;
    if max_deals == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PLAYSMART_MAX_DEALS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let request_timeout_secs = parse_number(
        &or_default("PLAYSMART_REQUEST_TIMEOUT_SECS", "10"),
        "PLAYSMART_REQUEST_TIMEOUT_SECS",
    )?;
    let user_agent = or_default("PLAYSMART_USER_AGENT", "playsmart/0.1 (game-deal-tracker)");
    let max_retries = parse_number(
        &or_default("PLAYSMART_MAX_RETRIES", "3"),
        "PLAYSMART_MAX_RETRIES",
    )?;
    let retry_backoff_base_ms = parse_number(
        &or_default("PLAYSMART_RETRY_BACKOFF_BASE_MS", "500"),
        "PLAYSMART_RETRY_BACKOFF_BASE_MS",
    )?;

    let raw_dir = PathBuf::from(or_default("PLAYSMART_RAW_DIR", "./data_raw"));
    let processed_dir = PathBuf::from(or_default("PLAYSMART_PROCESSED_DIR", "./data_processed"));

    Ok(AppConfig {
        env,
        log_level,
        log_dir,
        api_base_url,
        sort_by,
        max_deals,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        raw_dir,
        processed_dir,
    })
}

fn parse_number<T>(raw: &str, var: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PLAYSMART_ENV".to_string(),
            reason: format!("expected development, test or production; got {other:?}"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
