//! Named sets of search variants ("query packs").
//!
//! One pack is built in. More can be loaded from a YAML file shaped like:
//!
//! ```yaml
//! packs:
//!   - name: paris_fintech
//!     description: Young fintechs
//!     searches:
//!       - term: ""
//!         activity_code: "64.99Z"
//!         administrative_status: A
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::bands::UNDER_20_EMPLOYEES;
use crate::search::SearchRequest;
use crate::ConfigError;

pub const BLOSSOM_LIKE_FRANCE: &str = "blossom_like_france";

/// Postal prefix used for the "Paris only" post-filter.
pub const PARIS_POSTAL_PREFIX: &str = "75";

static ACTIVITY_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}\.\d{2}[A-Z]$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPack {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub searches: Vec<SearchRequest>,
}

#[derive(Debug, Deserialize)]
struct QueryPacksFile {
    packs: Vec<QueryPack>,
}

/// Compact pack targeting small, active French software/IT companies.
///
/// No postal code is sent upstream. The search API only accepts full
/// five-digit codes, so "Paris only" is applied as a post-filter instead.
#[must_use]
pub fn blossom_like_france() -> QueryPack {
    let searches = ["58.29C", "62.01Z"]
        .into_iter()
        .map(|code| {
            SearchRequest::new("")
                .with_activity_code(code)
                .with_employee_bands(UNDER_20_EMPLOYEES)
                .with_administrative_status("A")
        })
        .collect();

    QueryPack {
        name: BLOSSOM_LIKE_FRANCE.to_string(),
        description: "Compact pack targeting French software/IT companies.".to_string(),
        searches,
    }
}

#[must_use]
pub fn builtin_packs() -> Vec<QueryPack> {
    vec![blossom_like_france()]
}

/// Looks a pack up by name, checking `extra` (loaded packs) before the
/// built-in ones.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownQueryPack`] if no pack has that name.
pub fn get_query_pack(name: &str, extra: &[QueryPack]) -> Result<QueryPack, ConfigError> {
    extra
        .iter()
        .find(|p| p.name == name)
        .cloned()
        .or_else(|| builtin_packs().into_iter().find(|p| p.name == name))
        .ok_or_else(|| ConfigError::UnknownQueryPack(name.to_string()))
}

/// Load and validate additional query packs from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_query_packs(path: &Path) -> Result<Vec<QueryPack>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PacksFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: QueryPacksFile = serde_yaml::from_str(&content)?;
    validate_packs(&file.packs)?;

    tracing::debug!(path = %path.display(), count = file.packs.len(), "loaded query packs");
    Ok(file.packs)
}

fn validate_packs(packs: &[QueryPack]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for pack in packs {
        if pack.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "pack name must be non-empty".to_string(),
            ));
        }

        if !seen.insert(pack.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate pack name: '{}'",
                pack.name
            )));
        }

        if pack.searches.is_empty() {
            return Err(ConfigError::Validation(format!(
                "pack '{}' has no searches",
                pack.name
            )));
        }
    }

    Ok(())
}

/// Splits a comma-separated list of NAF codes and keeps the well-formed ones.
///
/// Stray characters (anything but digits, uppercase letters and dots) are
/// stripped before matching, so `"62.01z~"` becomes `"62.01Z"`. Returns the
/// valid codes and the original text of the rejected entries.
#[must_use]
pub fn normalize_activity_codes(raw: &str) -> (Vec<String>, Vec<String>) {
    let mut valid = Vec::new();
    let mut invalid = Vec::new();

    let upper = raw.trim().to_uppercase();
    for part in upper.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let cleaned: String = part
            .chars()
            .filter(|c| c.is_ascii_digit() || c.is_ascii_uppercase() || *c == '.')
            .collect();
        if ACTIVITY_CODE_RE.is_match(&cleaned) {
            valid.push(cleaned);
        } else {
            invalid.push(part.to_string());
        }
    }

    (valid, invalid)
}

/// User overrides layered on top of a pack's searches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOverrides {
    pub term: Option<String>,
    /// Replaces the pack's variants entirely, one variant per code.
    pub activity_codes: Vec<String>,
    pub employee_band_codes: Option<String>,
    pub administrative_status: Option<String>,
}

impl SearchOverrides {
    #[must_use]
    pub fn apply(&self, searches: &[SearchRequest]) -> Vec<SearchRequest> {
        let term = self.term.as_deref().filter(|t| !t.trim().is_empty());

        if !self.activity_codes.is_empty() {
            let base = searches.first().cloned().unwrap_or_default();
            return self
                .activity_codes
                .iter()
                .map(|code| SearchRequest {
                    term: term.map_or_else(|| base.term.clone(), str::to_string),
                    activity_code: Some(code.clone()),
                    postal_code: base.postal_code.clone(),
                    employee_band_codes: self
                        .employee_band_codes
                        .clone()
                        .or_else(|| base.employee_band_codes.clone()),
                    administrative_status: self
                        .administrative_status
                        .clone()
                        .or_else(|| base.administrative_status.clone()),
                    minimal: base.minimal,
                    include: base.include.clone(),
                })
                .collect();
        }

        searches
            .iter()
            .map(|s| SearchRequest {
                term: term.map_or_else(|| s.term.clone(), str::to_string),
                employee_band_codes: self
                    .employee_band_codes
                    .clone()
                    .or_else(|| s.employee_band_codes.clone()),
                administrative_status: self
                    .administrative_status
                    .clone()
                    .or_else(|| s.administrative_status.clone()),
                ..s.clone()
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "packs_test.rs"]
mod tests;
