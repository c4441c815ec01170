use std::time::Duration;

use playsmart_core::{AppConfig, RawDealRecord};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;
use crate::types::GameDetail;

/// Client for the CheapShark REST API (`/deals` and `/games`).
///
/// Maps 429, 404 and other non-2xx responses to typed errors. Transient
/// failures (429, network errors, 5xx) are retried with exponential back-off
/// up to `max_retries` additional attempts.
pub struct CheapSharkClient {
    client: Client,
    /// API root without a trailing slash, e.g. `https://www.cheapshark.com/api/1.0`.
    base_url: String,
    max_retries: u32,
    /// Base delay in milliseconds: the n-th retry waits `backoff_base_ms * 2^(n-1)`.
    backoff_base_ms: u64,
}

impl CheapSharkClient {
    /// Creates a client with the given timeout, `User-Agent` and retry policy.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidBaseUrl`] if `base_url` is not an absolute
    ///   `http(s)` URL.
    /// - [`ScraperError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ScraperError> {
        let parsed = Url::parse(base_url).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScraperError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_retries,
            backoff_base_ms,
        })
    }

    /// Builds a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
    }

    /// Fetches the current deals list, one record per JSON object, untouched.
    ///
    /// `sort_by` is passed through as CheapShark's `sortBy` parameter
    /// (`Savings`, `Deal Rating`, `Price`, ...). `page_size` caps the number
    /// of deals returned; CheapShark itself caps it at 60 per page.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`] after all retries are exhausted.
    /// - [`ScraperError::NotFound`] on HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`] for other non-2xx statuses.
    /// - [`ScraperError::Http`] on network failure after retries.
    /// - [`ScraperError::Deserialize`] if the body is not a JSON array of objects.
    pub async fn fetch_deals(
        &self,
        sort_by: &str,
        page_size: u32,
    ) -> Result<Vec<RawDealRecord>, ScraperError> {
        let url = self.deals_url(sort_by, page_size)?;
        let records: Vec<RawDealRecord> = self.get_json(&url, "deals list").await?;
        tracing::info!(count = records.len(), sort_by, page_size, "fetched deals");
        Ok(records)
    }

    /// Looks up every store's current offer for one game.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::GameNotFound`] when CheapShark answers with an empty
    ///   array, which is how it reports unknown IDs.
    /// - Otherwise the same errors as [`Self::fetch_deals`].
    pub async fn fetch_game(&self, game_id: &str) -> Result<GameDetail, ScraperError> {
        let url = self.game_url(game_id)?;
        let body: Value = self.get_json(&url, "game lookup").await?;

        if body.as_array().is_some_and(Vec::is_empty) {
            return Err(ScraperError::GameNotFound {
                game_id: game_id.to_owned(),
            });
        }

        let detail: GameDetail =
            serde_json::from_value(body).map_err(|e| ScraperError::Deserialize {
                context: format!("game {game_id}"),
                source: e,
            })?;
        tracing::debug!(game_id, offers = detail.deals.len(), "fetched game detail");
        Ok(detail)
    }

    /// GETs `url` with retry and decodes the body as `T`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        context: &str,
    ) -> Result<T, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self.client.get(url).send().await?;
            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .unwrap_or(0);
                return Err(ScraperError::RateLimited { retry_after_secs });
            }

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(ScraperError::NotFound {
                    url: url.to_owned(),
                });
            }

            if !status.is_success() {
                return Err(ScraperError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            let body = response.text().await?;
            serde_json::from_str::<T>(&body).map_err(|e| ScraperError::Deserialize {
                context: format!("{context} from {url}"),
                source: e,
            })
        })
        .await
    }

    /// `<base>/deals?sortBy=<sort_by>&pageSize=<page_size>`, query-encoded.
    fn deals_url(&self, sort_by: &str, page_size: u32) -> Result<String, ScraperError> {
        let mut url = self.endpoint("deals")?;
        url.query_pairs_mut()
            .append_pair("sortBy", sort_by)
            .append_pair("pageSize", &page_size.to_string());
        Ok(url.into())
    }

    /// `<base>/games?id=<game_id>`, query-encoded.
    fn game_url(&self, game_id: &str) -> Result<String, ScraperError> {
        let mut url = self.endpoint("games")?;
        url.query_pairs_mut().append_pair("id", game_id);
        Ok(url.into())
    }

    fn endpoint(&self, name: &str) -> Result<Url, ScraperError> {
        Url::parse(&format!("{}/{name}", self.base_url)).map_err(|e| {
            ScraperError::InvalidBaseUrl {
                base_url: self.base_url.clone(),
                reason: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
