use std::path::PathBuf;

/// Web search backend used for social profile candidate lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchProvider {
    SerpApi,
    GoogleCse,
}

impl std::fmt::Display for SearchProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchProvider::SerpApi => write!(f, "serpapi"),
            SearchProvider::GoogleCse => write!(f, "google_cse"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub api_base_url: String,
    pub http_timeout_secs: u64,
    /// Total attempts per page request, including the first one.
    pub http_max_attempts: u32,
    pub retry_base_delay_ms: u64,
    pub retry_max_delay_ms: u64,
    pub user_agent: String,
    pub cache_dir: PathBuf,
    pub query_packs_path: Option<PathBuf>,
    pub search_provider: Option<SearchProvider>,
    pub serpapi_api_key: Option<String>,
    pub google_cse_api_key: Option<String>,
    pub google_cse_cx: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("api_base_url", &self.api_base_url)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("http_max_attempts", &self.http_max_attempts)
            .field("retry_base_delay_ms", &self.retry_base_delay_ms)
            .field("retry_max_delay_ms", &self.retry_max_delay_ms)
            .field("user_agent", &self.user_agent)
            .field("cache_dir", &self.cache_dir)
            .field("query_packs_path", &self.query_packs_path)
            .field("search_provider", &self.search_provider)
            .field(
                "serpapi_api_key",
                &self.serpapi_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "google_cse_api_key",
                &self.google_cse_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("google_cse_cx", &self.google_cse_cx)
            .finish()
    }
}
