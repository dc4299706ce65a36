use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.api_base_url, "https://recherche-entreprises.api.gouv.fr");
    assert_eq!(cfg.http_timeout_secs, 20);
    assert_eq!(cfg.http_max_attempts, 3);
    assert_eq!(cfg.retry_base_delay_ms, 500);
    assert_eq!(cfg.retry_max_delay_ms, 8000);
    assert_eq!(cfg.user_agent, "regscout/0.1");
    assert_eq!(cfg.cache_dir, PathBuf::from(".cache"));
    assert!(cfg.query_packs_path.is_none());
    assert!(cfg.search_provider.is_none());
    assert!(cfg.serpapi_api_key.is_none());
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("REGSCOUT_API_BASE_URL", "http://localhost:9000");
    map.insert("REGSCOUT_HTTP_TIMEOUT_SECS", "5");
    map.insert("REGSCOUT_HTTP_MAX_ATTEMPTS", "6");
    map.insert("REGSCOUT_CACHE_DIR", "/tmp/regscout");
    map.insert("REGSCOUT_QUERY_PACKS_PATH", "./config/packs.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "http://localhost:9000");
    assert_eq!(cfg.http_timeout_secs, 5);
    assert_eq!(cfg.http_max_attempts, 6);
    assert_eq!(cfg.cache_dir, PathBuf::from("/tmp/regscout"));
    assert_eq!(
        cfg.query_packs_path,
        Some(PathBuf::from("./config/packs.yaml"))
    );
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("REGSCOUT_HTTP_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REGSCOUT_HTTP_TIMEOUT_SECS"),
        "expected InvalidEnvVar(REGSCOUT_HTTP_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_max_attempts() {
    let mut map = HashMap::new();
    map.insert("REGSCOUT_HTTP_MAX_ATTEMPTS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REGSCOUT_HTTP_MAX_ATTEMPTS"),
        "expected InvalidEnvVar(REGSCOUT_HTTP_MAX_ATTEMPTS), got: {result:?}"
    );
}

#[test]
fn build_app_config_parses_search_provider_case_insensitively() {
    let mut map = HashMap::new();
    map.insert("REGSCOUT_SEARCH_PROVIDER", "SerpApi");
    map.insert("SERPAPI_API_KEY", "secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.search_provider, Some(SearchProvider::SerpApi));
    assert_eq!(cfg.serpapi_api_key.as_deref(), Some("secret"));
}

#[test]
fn build_app_config_rejects_unknown_search_provider() {
    let mut map = HashMap::new();
    map.insert("REGSCOUT_SEARCH_PROVIDER", "bing");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REGSCOUT_SEARCH_PROVIDER"),
        "expected InvalidEnvVar(REGSCOUT_SEARCH_PROVIDER), got: {result:?}"
    );
}

#[test]
fn blank_values_are_treated_as_unset() {
    let mut map = HashMap::new();
    map.insert("REGSCOUT_SEARCH_PROVIDER", "  ");
    map.insert("GOOGLE_CSE_CX", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.search_provider.is_none());
    assert!(cfg.google_cse_cx.is_none());
}

#[test]
fn debug_output_redacts_api_keys() {
    let mut map = HashMap::new();
    map.insert("SERPAPI_API_KEY", "super-secret");
    map.insert("GOOGLE_CSE_API_KEY", "other-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("super-secret"));
    assert!(!debug.contains("other-secret"));
    assert!(debug.contains("[redacted]"));
}

#[test]
fn unrecognised_variables_are_ignored() {
    let mut map = HashMap::new();
    map.insert("REGSCOUT_ENV", "staging");
    map.insert("REGSCOUT_SOMETHING_ELSE", "x");
    let cfg = build_app_config(lookup_from_map(&map)).expect("unknown vars should not fail");
    assert_eq!(cfg.log_level, "info");
}
