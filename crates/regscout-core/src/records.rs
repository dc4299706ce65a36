use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Source tag stamped on every record built from the upstream `/search` endpoint.
pub const SEARCH_SOURCE: &str = "recherche-entreprises.api.gouv.fr/search";

/// Registry country. Only the French registry is supported today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "FR")]
    France,
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Country::France => write!(f, "FR"),
        }
    }
}

/// A company from the national registry, normalized for display, filtering
/// and caching.
///
/// Built once during normalization and never mutated afterwards.
/// `registry_id` (the SIREN) is the natural key: it is unique per company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub country: Country,
    /// Nine-digit SIREN.
    pub registry_id: String,
    /// Fourteen-digit SIRET of the headquarters establishment.
    pub establishment_id: Option<String>,
    pub name: String,
    /// NAF activity code, e.g. `"62.01Z"`.
    pub activity_code: Option<String>,
    pub creation_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub commune: Option<String>,
    pub department: Option<String>,
    pub region: Option<String>,
    /// Upstream employee band code, e.g. `"11"`. See [`crate::employee_band_label`].
    pub employee_band: Option<String>,
    pub employee_band_year: Option<i32>,
    /// `None` when the registry does not say whether the company employs staff.
    pub is_employer: Option<bool>,
    pub source: String,
}

impl CompanyRecord {
    /// Public registry page for this company.
    #[must_use]
    pub fn registry_url(&self) -> String {
        format!("https://data.inpi.fr/entreprises/{}", self.registry_id)
    }

    /// Age in whole years at `today`, or `None` without a creation date.
    #[must_use]
    pub fn age_years(&self, today: NaiveDate) -> Option<u32> {
        self.creation_date.and_then(|created| today.years_since(created))
    }
}
