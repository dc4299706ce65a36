//! Public-profile lookups for company officers.
//!
//! The query builders produce Google-style queries restricted to LinkedIn
//! or X. [`SocialSearchClient`] optionally runs them through a paid search
//! provider; without one the caller still gets a plain Google URL to open.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regscout_core::{AppConfig, SearchProvider};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{is_retryable_status, RegistryError};
use crate::retry::{retry_with_backoff, RetryPolicy};

const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";
const SERPAPI_ENDPOINT: &str = "https://serpapi.com/search.json";
const GOOGLE_CSE_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Form-style query encoding: unreserved characters pass through, spaces
/// become `+` afterwards.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// One search hit that may be the person's profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialCandidate {
    pub title: String,
    pub url: String,
    pub snippet: Option<String>,
}

fn query_core(person: &str, company: &str) -> String {
    let bits: Vec<&str> = [person, company]
        .into_iter()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .collect();
    if bits.is_empty() {
        person.trim().to_owned()
    } else {
        bits.join(" ")
    }
}

#[must_use]
pub fn linkedin_people_query(person: &str, company: &str) -> String {
    format!("\"{}\" site:linkedin.com/in", query_core(person, company))
}

#[must_use]
pub fn x_people_query(person: &str, company: &str) -> String {
    format!(
        "\"{}\" (site:x.com OR site:twitter.com)",
        query_core(person, company)
    )
}

/// Google results page for `query`, for opening in a browser.
#[must_use]
pub fn google_search_url(query: &str) -> String {
    let encoded = utf8_percent_encode(query, QUERY_VALUE)
        .to_string()
        .replace("%20", "+");
    format!("{GOOGLE_SEARCH_URL}?q={encoded}")
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Option<Vec<SearchHit>>,
}

#[derive(Debug, Deserialize)]
struct GoogleCseResponse {
    #[serde(default)]
    items: Option<Vec<SearchHit>>,
}

#[derive(Debug, Clone)]
enum Provider {
    SerpApi {
        api_key: String,
    },
    GoogleCse {
        api_key: String,
        cx: String,
    },
}

/// Runs profile queries through SerpApi or Google Programmable Search.
///
/// A client without a usable provider (none selected, or its credentials
/// missing) is valid and simply returns no candidates.
pub struct SocialSearchClient {
    client: Client,
    provider: Option<Provider>,
    serpapi_endpoint: String,
    google_cse_endpoint: String,
    retry: RetryPolicy,
}

impl SocialSearchClient {
    /// # Errors
    ///
    /// Returns [`RegistryError::Http`] if the `reqwest::Client` cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, RegistryError> {
        Self::with_endpoints(config, SERPAPI_ENDPOINT, GOOGLE_CSE_ENDPOINT)
    }

    /// Same as [`SocialSearchClient::from_config`] with provider endpoints
    /// overridden (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_endpoints(
        config: &AppConfig,
        serpapi_endpoint: &str,
        google_cse_endpoint: &str,
    ) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .build()?;

        let provider = match config.search_provider {
            Some(SearchProvider::SerpApi) => config
                .serpapi_api_key
                .clone()
                .map(|api_key| Provider::SerpApi { api_key }),
            Some(SearchProvider::GoogleCse) => config
                .google_cse_api_key
                .clone()
                .zip(config.google_cse_cx.clone())
                .map(|(api_key, cx)| Provider::GoogleCse { api_key, cx }),
            None => None,
        };
        if config.search_provider.is_some() && provider.is_none() {
            tracing::warn!(
                provider = ?config.search_provider,
                "search provider selected but its credentials are missing"
            );
        }

        Ok(Self {
            client,
            provider,
            serpapi_endpoint: serpapi_endpoint.to_owned(),
            google_cse_endpoint: google_cse_endpoint.to_owned(),
            retry: RetryPolicy {
                max_attempts: config.http_max_attempts,
                base_delay: Duration::from_millis(config.retry_base_delay_ms),
                max_delay: Duration::from_millis(config.retry_max_delay_ms),
            },
        })
    }

    /// Whether [`SocialSearchClient::search_candidates`] can return anything.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Returns at most `max_results` candidates for `query`, in provider
    /// order. Hits without a link are skipped; a missing title falls back
    /// to the link.
    ///
    /// # Errors
    ///
    /// Same failure modes as a registry request: network errors and
    /// non-2xx statuses (transient ones retried), or an unparseable body.
    pub async fn search_candidates(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SocialCandidate>, RegistryError> {
        let Some(provider) = &self.provider else {
            return Ok(Vec::new());
        };
        let num = max_results.to_string();

        let (url, context) = match provider {
            Provider::SerpApi { api_key } => {
                let url = Url::parse_with_params(
                    &self.serpapi_endpoint,
                    [
                        ("engine", "google"),
                        ("q", query),
                        ("api_key", api_key.as_str()),
                        ("num", num.as_str()),
                    ],
                )
                .map_err(|e| invalid_endpoint(&self.serpapi_endpoint, &e.to_string()))?;
                (url, "serpapi search")
            }
            Provider::GoogleCse { api_key, cx } => {
                let url = Url::parse_with_params(
                    &self.google_cse_endpoint,
                    [
                        ("key", api_key.as_str()),
                        ("cx", cx.as_str()),
                        ("q", query),
                        ("num", num.as_str()),
                    ],
                )
                .map_err(|e| invalid_endpoint(&self.google_cse_endpoint, &e.to_string()))?;
                (url, "google custom search")
            }
        };

        let body = self.get_text(&url).await?;
        let hits = match provider {
            Provider::SerpApi { .. } => parse_body::<SerpApiResponse>(&body, context)?
                .organic_results
                .unwrap_or_default(),
            Provider::GoogleCse { .. } => parse_body::<GoogleCseResponse>(&body, context)?
                .items
                .unwrap_or_default(),
        };

        let candidates = to_candidates(hits, max_results);
        tracing::debug!(
            provider = context,
            candidates = candidates.len(),
            "social search complete"
        );
        Ok(candidates)
    }

    async fn get_text(&self, url: &Url) -> Result<String, RegistryError> {
        retry_with_backoff(self.retry, || async move {
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();
            // The URL carries the API key; report the endpoint only.
            let endpoint = format!("{}{}", url.origin().ascii_serialization(), url.path());
            if is_retryable_status(status) {
                return Err(RegistryError::RetryableStatus {
                    status: status.as_u16(),
                    url: endpoint,
                });
            }
            if !status.is_success() {
                return Err(RegistryError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: endpoint,
                });
            }
            Ok(response.text().await?)
        })
        .await
    }
}

fn invalid_endpoint(endpoint: &str, reason: &str) -> RegistryError {
    RegistryError::InvalidBaseUrl {
        base_url: endpoint.to_owned(),
        reason: reason.to_owned(),
    }
}

fn parse_body<T: DeserializeOwned>(body: &str, context: &str) -> Result<T, RegistryError> {
    serde_json::from_str(body).map_err(|source| RegistryError::Deserialize {
        context: context.to_owned(),
        source,
    })
}

fn to_candidates(hits: Vec<SearchHit>, max_results: usize) -> Vec<SocialCandidate> {
    hits.into_iter()
        .take(max_results)
        .filter_map(|hit| {
            let url = hit.link.filter(|l| !l.is_empty())?;
            let title = hit
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| url.clone());
            Some(SocialCandidate {
                title,
                url,
                snippet: hit.snippet,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linkedin_query_quotes_person_and_company() {
        let q = linkedin_people_query("Stanislas Niox-Chateau", "Doctolib");
        assert_eq!(q, "\"Stanislas Niox-Chateau Doctolib\" site:linkedin.com/in");
    }

    #[test]
    fn x_query_covers_both_domains() {
        let q = x_people_query("Jane Doe", "  ");
        assert_eq!(q, "\"Jane Doe\" (site:x.com OR site:twitter.com)");
    }

    #[test]
    fn blank_inputs_give_empty_phrase() {
        assert_eq!(linkedin_people_query(" ", ""), "\"\" site:linkedin.com/in");
    }

    #[test]
    fn google_url_is_form_encoded() {
        let url = google_search_url("\"Jane Doe\" site:linkedin.com/in");
        assert_eq!(
            url,
            "https://www.google.com/search?q=%22Jane+Doe%22+site%3Alinkedin.com%2Fin"
        );
    }

    #[test]
    fn google_url_encodes_non_ascii() {
        let url = google_search_url("Hélène");
        assert_eq!(url, "https://www.google.com/search?q=H%C3%A9l%C3%A8ne");
    }

    #[test]
    fn candidates_skip_missing_links_and_default_titles() {
        let hits = vec![
            SearchHit {
                title: Some("Jane Doe - CEO".into()),
                link: Some("https://www.linkedin.com/in/janedoe".into()),
                snippet: Some("Paris".into()),
            },
            SearchHit {
                title: Some("no link".into()),
                link: None,
                snippet: None,
            },
            SearchHit {
                title: None,
                link: Some("https://x.com/janedoe".into()),
                snippet: None,
            },
        ];
        let candidates = to_candidates(hits, 5);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].title, "Jane Doe - CEO");
        assert_eq!(candidates[1].title, "https://x.com/janedoe");
    }

    #[test]
    fn candidates_respect_max_results() {
        let hits = (0..4)
            .map(|i| SearchHit {
                title: None,
                link: Some(format!("https://example.com/{i}")),
                snippet: None,
            })
            .collect();
        assert_eq!(to_candidates(hits, 2).len(), 2);
    }
}
