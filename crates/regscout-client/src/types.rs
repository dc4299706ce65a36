//! Response types for the registry's public `GET /search` endpoint.
//!
//! Field names follow the upstream French JSON keys via `serde(rename)`.
//! Every field except the pagination envelope and the SIREN is optional, and
//! unknown keys are ignored, so upstream additions never break parsing.
//!
//! ### Dates
//! `date_creation` is an ISO date (`"2025-04-01"`) or `null`.
//!
//! ### Employee band year
//! `annee_tranche_effectif_salarie` arrives as a string (`"2022"`), and
//! occasionally as something that is not a year at all. It is kept raw here
//! and parsed leniently during normalization.
//!
//! ### Employer flag
//! `caractere_employeur` is `"O"` (oui), `"N"` (non), or absent.

use chrono::NaiveDate;
use serde::Deserialize;

/// One page of search results.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub total_results: u64,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// A single company in a search page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "siren")]
    pub registry_id: String,

    /// Legal name.
    #[serde(rename = "nom_raison_sociale", default)]
    pub legal_name: Option<String>,

    /// Full display name, used when the legal name is absent.
    #[serde(rename = "nom_complet", default)]
    pub full_name: Option<String>,

    #[serde(rename = "sigle", default)]
    pub acronym: Option<String>,

    #[serde(rename = "activite_principale", default)]
    pub activity_code: Option<String>,

    #[serde(rename = "date_creation", default)]
    pub creation_date: Option<NaiveDate>,

    #[serde(rename = "siege", default)]
    pub headquarters: Option<Headquarters>,

    #[serde(rename = "nombre_etablissements", default)]
    pub establishment_count: Option<u32>,

    #[serde(rename = "nombre_etablissements_ouverts", default)]
    pub open_establishment_count: Option<u32>,

    #[serde(rename = "dirigeants", default)]
    pub officers: Option<Vec<Officer>>,

    #[serde(default)]
    pub complements: Option<serde_json::Map<String, serde_json::Value>>,

    /// Yearly financials keyed by year, e.g. `{"2023": {"ca": 1200000}}`.
    #[serde(default)]
    pub finances: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Registered head office (`siege`) of a company.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Headquarters {
    #[serde(rename = "siret", default)]
    pub establishment_id: Option<String>,

    #[serde(rename = "activite_principale", default)]
    pub activity_code: Option<String>,

    #[serde(rename = "code_postal", default)]
    pub postal_code: Option<String>,

    #[serde(rename = "libelle_commune", default)]
    pub commune: Option<String>,

    #[serde(rename = "departement", default)]
    pub department: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    /// Raw address line.
    #[serde(rename = "adresse", default)]
    pub address: Option<String>,

    /// Geocoded address; preferred over `address` when present.
    #[serde(rename = "geo_adresse", default)]
    pub geo_address: Option<String>,

    #[serde(default)]
    pub latitude: Option<String>,

    #[serde(default)]
    pub longitude: Option<String>,

    #[serde(rename = "date_creation", default)]
    pub creation_date: Option<NaiveDate>,

    #[serde(rename = "tranche_effectif_salarie", default)]
    pub employee_band: Option<String>,

    #[serde(rename = "annee_tranche_effectif_salarie", default)]
    pub employee_band_year: Option<String>,

    #[serde(rename = "etat_administratif", default)]
    pub administrative_status: Option<String>,

    #[serde(rename = "caractere_employeur", default)]
    pub employer_flag: Option<String>,
}

/// A company officer (`dirigeant`): either a natural person or another company.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Officer {
    /// `"personne physique"` or `"personne morale"`.
    #[serde(rename = "type_dirigeant", default)]
    pub officer_type: Option<String>,

    /// Role, e.g. `"Président de SAS"`.
    #[serde(rename = "qualite", default)]
    pub role: Option<String>,

    #[serde(rename = "nom", default)]
    pub last_name: Option<String>,

    #[serde(rename = "prenoms", default)]
    pub first_names: Option<String>,

    #[serde(rename = "date_de_naissance", default)]
    pub birth_date: Option<String>,

    #[serde(rename = "annee_de_naissance", default)]
    pub birth_year: Option<String>,

    #[serde(rename = "nationalite", default)]
    pub nationality: Option<String>,

    /// Company name, for officers that are themselves companies.
    #[serde(rename = "denomination", default)]
    pub company_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_page_and_ignores_unknown_fields() {
        let body = serde_json::json!({
            "page": 1,
            "per_page": 25,
            "total_pages": 4,
            "total_results": 90,
            "some_future_field": {"x": 1},
            "results": [{
                "siren": "941429565",
                "nom_raison_sociale": "PIGMENT",
                "date_creation": "2025-04-01",
                "matching_etablissements": [],
                "siege": {
                    "siret": "94142956500026",
                    "code_postal": "75002",
                    "caractere_employeur": "O",
                    "est_siege": true
                }
            }]
        });
        let page: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.results.len(), 1);
        let result = &page.results[0];
        assert_eq!(result.registry_id, "941429565");
        assert_eq!(result.creation_date, NaiveDate::from_ymd_opt(2025, 4, 1));
        let hq = result.headquarters.as_ref().unwrap();
        assert_eq!(hq.postal_code.as_deref(), Some("75002"));
        assert_eq!(hq.employer_flag.as_deref(), Some("O"));
    }

    #[test]
    fn null_optional_fields_parse_as_none() {
        let body = serde_json::json!({
            "siren": "111111111",
            "nom_raison_sociale": null,
            "siege": null,
            "dirigeants": null,
            "finances": null
        });
        let result: SearchResult = serde_json::from_value(body).unwrap();
        assert!(result.legal_name.is_none());
        assert!(result.headquarters.is_none());
        assert!(result.officers.is_none());
    }

    #[test]
    fn missing_siren_is_an_error() {
        let body = serde_json::json!({ "nom_raison_sociale": "NO ID" });
        assert!(serde_json::from_value::<SearchResult>(body).is_err());
    }

    #[test]
    fn parses_officers_of_both_kinds() {
        let body = serde_json::json!({
            "siren": "794598813",
            "dirigeants": [
                {
                    "type_dirigeant": "personne physique",
                    "qualite": "Président de SAS",
                    "nom": "NIOX-CHATEAU",
                    "prenoms": "STANISLAS",
                    "annee_de_naissance": "1986",
                    "ville_naissance": "Paris"
                },
                {
                    "type_dirigeant": "personne morale",
                    "qualite": "Administrateur",
                    "denomination": "SOME_HOLDCO",
                    "siren": "111222333"
                }
            ]
        });
        let result: SearchResult = serde_json::from_value(body).unwrap();
        let officers = result.officers.unwrap();
        assert_eq!(officers.len(), 2);
        assert_eq!(officers[0].last_name.as_deref(), Some("NIOX-CHATEAU"));
        assert_eq!(officers[1].company_name.as_deref(), Some("SOME_HOLDCO"));
    }
}
