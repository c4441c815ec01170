use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for a pipeline run, resolved from `PLAYSMART_*` env vars.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// When set, the CLI mirrors log output into a per-run file here.
    pub log_dir: Option<PathBuf>,
    /// CheapShark API root, without trailing slash.
    pub api_base_url: String,
    /// `sortBy` value sent to the deals endpoint.
    pub sort_by: String,
    /// Page size requested from the deals endpoint.
    pub max_deals: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// Directory receiving one `deals_raw_<ts>.json` per run.
    pub raw_dir: PathBuf,
    /// Directory receiving `deals_processed_<ts>.csv` and the run summary.
    pub processed_dir: PathBuf,
}
