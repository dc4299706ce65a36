//! HTTP client for the registry's public `GET /search` endpoint.

mod company;
mod fetch_all;

use std::time::Duration;

use regscout_core::{AppConfig, SearchRequest};
use reqwest::{Client, Url};

use crate::error::{is_retryable_status, RegistryError};
use crate::retry::{retry_with_backoff, RetryPolicy};
use crate::types::SearchResponse;

/// Hard upstream maximum for `per_page`; larger values get HTTP 400.
pub const PER_PAGE_MAX: u32 = 25;

const DEFAULT_BASE_URL: &str = "https://recherche-entreprises.api.gouv.fr";

/// Client for the French company registry search API.
///
/// Holds one pooled `reqwest::Client` for the lifetime of a collection
/// session and nothing else; dropping it releases the connections.
///
/// Transient failures (timeouts, connection errors, HTTP 429/500/502/503/504)
/// are retried per request according to the client's [`RetryPolicy`].
pub struct RegistryClient {
    client: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl RegistryClient {
    /// Creates a client pointed at the production registry API.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        retry: RetryPolicy,
    ) -> Result<Self, RegistryError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent, retry)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`RegistryError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        retry: RetryPolicy,
    ) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A trailing slash makes `Url::join("search")` append rather than
        // replace the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| RegistryError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            retry,
        })
    }

    /// Builds a client from application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`RegistryClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, RegistryError> {
        let retry = RetryPolicy {
            max_attempts: config.http_max_attempts,
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
            max_delay: Duration::from_millis(config.retry_max_delay_ms),
        };
        Self::with_base_url(
            &config.api_base_url,
            config.http_timeout_secs,
            &config.user_agent,
            retry,
        )
    }

    /// Fetches one page of search results, retrying transient failures.
    ///
    /// When `request.include` is set, `minimal=true` is sent regardless of
    /// `request.minimal`, since upstream rejects `include` without it.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidPageSize`]: `per_page` is 0 or above
    ///   [`PER_PAGE_MAX`]. No request is sent.
    /// - [`RegistryError::RetryableStatus`]: HTTP 429/5xx after all attempts.
    /// - [`RegistryError::Http`]: network failure after all attempts.
    /// - [`RegistryError::UnexpectedStatus`]: any other non-2xx status (not retried).
    /// - [`RegistryError::Deserialize`]: body does not match [`SearchResponse`]
    ///   (not retried).
    pub async fn search_page(
        &self,
        request: &SearchRequest,
        page: u32,
        per_page: u32,
    ) -> Result<SearchResponse, RegistryError> {
        let url = self.search_url(request, page, per_page)?;

        retry_with_backoff(self.retry, || {
            let url = url.clone();
            async move {
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();

                if is_retryable_status(status) {
                    return Err(RegistryError::RetryableStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(RegistryError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                let parsed = serde_json::from_str::<SearchResponse>(&body).map_err(|e| {
                    RegistryError::Deserialize {
                        context: format!("search page {page} ({})", request.label()),
                        source: e,
                    }
                })?;

                tracing::debug!(
                    request = %request.label(),
                    page,
                    total_pages = parsed.total_pages,
                    results = parsed.results.len(),
                    "fetched search page"
                );
                Ok(parsed)
            }
        })
        .await
    }

    /// Builds the `/search` URL with percent-encoded query parameters.
    ///
    /// Optional filters are only sent when non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidPageSize`] when `per_page` is out of range.
    fn search_url(
        &self,
        request: &SearchRequest,
        page: u32,
        per_page: u32,
    ) -> Result<Url, RegistryError> {
        if per_page == 0 || per_page > PER_PAGE_MAX {
            return Err(RegistryError::InvalidPageSize {
                per_page,
                max: PER_PAGE_MAX,
            });
        }

        let mut url = self
            .base_url
            .join("search")
            .map_err(|e| RegistryError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        let non_empty = |v: &Option<String>| {
            v.as_deref()
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };
        let include = non_empty(&request.include);
        let minimal = if include.is_some() {
            Some(true)
        } else {
            request.minimal
        };

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", &request.term);
            pairs.append_pair("page", &page.to_string());
            pairs.append_pair("per_page", &per_page.to_string());
            if let Some(code) = non_empty(&request.activity_code) {
                pairs.append_pair("activite_principale", &code);
            }
            if let Some(postal) = non_empty(&request.postal_code) {
                pairs.append_pair("code_postal", &postal);
            }
            if let Some(bands) = non_empty(&request.employee_band_codes) {
                pairs.append_pair("tranche_effectif_salarie", &bands);
            }
            if let Some(status) = non_empty(&request.administrative_status) {
                pairs.append_pair("etat_administratif", &status);
            }
            if let Some(minimal) = minimal {
                pairs.append_pair("minimal", if minimal { "true" } else { "false" });
            }
            if let Some(include) = &include {
                pairs.append_pair("include", include);
            }
        }

        Ok(url)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
