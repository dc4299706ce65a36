use std::path::PathBuf;

use crate::app_config::{AppConfig, SearchProvider};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields a usable config.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("REGSCOUT_LOG_LEVEL", "info");
    let api_base_url = or_default(
        "REGSCOUT_API_BASE_URL",
        "https://recherche-entreprises.api.gouv.fr",
    );

    let http_timeout_secs = parse_u64("REGSCOUT_HTTP_TIMEOUT_SECS", "20")?;
    let http_max_attempts = parse_u32("REGSCOUT_HTTP_MAX_ATTEMPTS", "3")?;
    if http_max_attempts == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "REGSCOUT_HTTP_MAX_ATTEMPTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let retry_base_delay_ms = parse_u64("REGSCOUT_RETRY_BASE_DELAY_MS", "500")?;
    let retry_max_delay_ms = parse_u64("REGSCOUT_RETRY_MAX_DELAY_MS", "8000")?;

    let user_agent = or_default("REGSCOUT_USER_AGENT", "regscout/0.1");
    let cache_dir = PathBuf::from(or_default("REGSCOUT_CACHE_DIR", ".cache"));
    let query_packs_path = optional("REGSCOUT_QUERY_PACKS_PATH").map(PathBuf::from);

    let search_provider = optional("REGSCOUT_SEARCH_PROVIDER")
        .map(|raw| parse_search_provider(&raw))
        .transpose()?;

    Ok(AppConfig {
        log_level,
        api_base_url,
        http_timeout_secs,
        http_max_attempts,
        retry_base_delay_ms,
        retry_max_delay_ms,
        user_agent,
        cache_dir,
        query_packs_path,
        search_provider,
        serpapi_api_key: optional("SERPAPI_API_KEY"),
        google_cse_api_key: optional("GOOGLE_CSE_API_KEY"),
        google_cse_cx: optional("GOOGLE_CSE_CX"),
    })
}

fn parse_search_provider(s: &str) -> Result<SearchProvider, ConfigError> {
    match s.to_lowercase().as_str() {
        "serpapi" => Ok(SearchProvider::SerpApi),
        "google_cse" => Ok(SearchProvider::GoogleCse),
        other => Err(ConfigError::InvalidEnvVar {
            var: "REGSCOUT_SEARCH_PROVIDER".to_string(),
            reason: format!("unknown search provider '{other}'; expected serpapi or google_cse"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
