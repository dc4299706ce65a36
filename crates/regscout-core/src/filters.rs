//! Caller-side post-filters applied around a collection run.

use chrono::{Datelike, NaiveDate};

use crate::records::CompanyRecord;

/// Employer-flag filter. The collector never applies it; callers do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmployerFilter {
    #[default]
    Any,
    /// Keep only records explicitly flagged as employers.
    Yes,
    /// Keep only records explicitly flagged as non-employers.
    No,
}

impl EmployerFilter {
    /// Records with an unknown employer flag only survive [`EmployerFilter::Any`].
    #[must_use]
    pub fn apply(self, records: Vec<CompanyRecord>) -> Vec<CompanyRecord> {
        match self {
            EmployerFilter::Any => records,
            EmployerFilter::Yes => records
                .into_iter()
                .filter(|r| r.is_employer == Some(true))
                .collect(),
            EmployerFilter::No => records
                .into_iter()
                .filter(|r| r.is_employer == Some(false))
                .collect(),
        }
    }
}

impl std::fmt::Display for EmployerFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmployerFilter::Any => write!(f, "any"),
            EmployerFilter::Yes => write!(f, "yes"),
            EmployerFilter::No => write!(f, "no"),
        }
    }
}

/// The same calendar day `years` years before `today`.
///
/// 29 February maps to 28 February in non-leap target years.
#[must_use]
pub fn years_ago(today: NaiveDate, years: u32) -> NaiveDate {
    let year = today.year() - i32::try_from(years).unwrap_or(i32::MAX);
    today
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, today.month(), 28))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Country, SEARCH_SOURCE};

    fn record(id: &str, is_employer: Option<bool>) -> CompanyRecord {
        CompanyRecord {
            country: Country::France,
            registry_id: id.to_string(),
            establishment_id: None,
            name: id.to_string(),
            activity_code: None,
            creation_date: None,
            address: None,
            postal_code: None,
            commune: None,
            department: None,
            region: None,
            employee_band: None,
            employee_band_year: None,
            is_employer,
            source: SEARCH_SOURCE.to_string(),
        }
    }

    fn ids(records: &[CompanyRecord]) -> Vec<&str> {
        records.iter().map(|r| r.registry_id.as_str()).collect()
    }

    #[test]
    fn employer_filter_any_keeps_everything() {
        let records = vec![record("1", Some(true)), record("2", None)];
        assert_eq!(ids(&EmployerFilter::Any.apply(records)), ["1", "2"]);
    }

    #[test]
    fn employer_filter_yes_and_no_drop_unknowns() {
        let records = vec![
            record("1", Some(true)),
            record("2", Some(false)),
            record("3", None),
        ];
        assert_eq!(ids(&EmployerFilter::Yes.apply(records.clone())), ["1"]);
        assert_eq!(ids(&EmployerFilter::No.apply(records)), ["2"]);
    }

    #[test]
    fn years_ago_keeps_day_and_month() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();
        assert_eq!(
            years_ago(today, 5),
            NaiveDate::from_ymd_opt(2021, 1, 19).unwrap()
        );
    }

    #[test]
    fn years_ago_handles_leap_day() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            years_ago(today, 1),
            NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
        );
    }
}
