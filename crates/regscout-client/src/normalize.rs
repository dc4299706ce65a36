//! Normalization from raw registry results to [`regscout_core::CompanyRecord`].

use regscout_core::{CompanyRecord, Country, SEARCH_SOURCE};

use crate::types::{Headquarters, SearchResult};

/// Normalizes a raw [`SearchResult`] into a [`CompanyRecord`].
///
/// Never fails: anything missing or malformed in the raw result becomes
/// `None` in the record.
#[must_use]
pub fn normalize_result(result: SearchResult) -> CompanyRecord {
    let SearchResult {
        registry_id,
        legal_name,
        full_name,
        activity_code,
        creation_date,
        headquarters,
        ..
    } = result;
    let hq = headquarters.unwrap_or_default();

    let name = present(legal_name)
        .or_else(|| present(full_name))
        .unwrap_or_else(|| registry_id.clone());

    CompanyRecord {
        country: Country::France,
        establishment_id: hq.establishment_id.clone(),
        name,
        activity_code: present(activity_code).or_else(|| hq.activity_code.clone()),
        creation_date: creation_date.or(hq.creation_date),
        address: present(hq.geo_address.clone()).or_else(|| hq.address.clone()),
        postal_code: hq.postal_code.clone(),
        commune: hq.commune.clone(),
        department: hq.department.clone(),
        region: hq.region.clone(),
        employee_band_year: parse_band_year(&hq),
        is_employer: parse_employer_flag(hq.employer_flag.as_deref()),
        employee_band: hq.employee_band,
        registry_id,
        source: SEARCH_SOURCE.to_string(),
    }
}

/// Upstream sends `""` for some unset text fields; treat it as absent.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Non-numeric years (`"NN"`, `""`) yield `None`.
fn parse_band_year(hq: &Headquarters) -> Option<i32> {
    hq.employee_band_year
        .as_deref()
        .and_then(|year| year.trim().parse::<i32>().ok())
}

fn parse_employer_flag(flag: Option<&str>) -> Option<bool> {
    match flag {
        Some("O") => Some(true),
        Some("N") => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
