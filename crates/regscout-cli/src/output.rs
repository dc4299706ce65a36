//! Rendering of collected records as a table, JSON, or CSV on stdout.

use std::io::Write;

use clap::ValueEnum;
use regscout_core::{employee_band_label, CompanyRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

const CSV_HEADER: [&str; 13] = [
    "siren",
    "name",
    "naf",
    "creation_date",
    "employee_band",
    "employee_band_year",
    "is_employer",
    "siret",
    "postal_code",
    "commune",
    "departement",
    "address",
    "source",
];

pub(crate) fn print_records(
    records: &[CompanyRecord],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => write_table(&mut out, records)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, records)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_csv(&mut out, records)?,
    }
    Ok(())
}

fn dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() > max_chars {
        format!("{}...", value.chars().take(max_chars).collect::<String>())
    } else {
        value.to_owned()
    }
}

pub(crate) fn write_table<W: Write>(
    out: &mut W,
    records: &[CompanyRecord],
) -> anyhow::Result<()> {
    if records.is_empty() {
        writeln!(out, "no companies matched")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<11}{:<12}{:<8}{:<8}{:<10}{:<9}NAME",
        "SIREN", "CREATED", "NAF", "POSTAL", "HEADCOUNT", "EMPLOYER"
    )?;
    for record in records {
        let created = record
            .creation_date
            .map_or_else(|| "-".to_owned(), |d| d.format("%Y-%m-%d").to_string());
        let band = dash(employee_band_label(record.employee_band.as_deref()));
        let employer = match record.is_employer {
            Some(true) => "yes",
            Some(false) => "no",
            None => "-",
        };
        writeln!(
            out,
            "{:<11}{:<12}{:<8}{:<8}{:<10}{:<9}{}",
            record.registry_id,
            created,
            dash(record.activity_code.as_deref()),
            dash(record.postal_code.as_deref()),
            band,
            employer,
            truncate(&record.name, 48)
        )?;
    }
    Ok(())
}

pub(crate) fn write_csv<W: Write>(out: W, records: &[CompanyRecord]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;
    for r in records {
        let creation_date = r.creation_date.map(|d| d.to_string()).unwrap_or_default();
        let band_year = r.employee_band_year.map(|y| y.to_string()).unwrap_or_default();
        let employer = r.is_employer.map(|e| e.to_string()).unwrap_or_default();
        writer.write_record([
            r.registry_id.as_str(),
            r.name.as_str(),
            r.activity_code.as_deref().unwrap_or(""),
            creation_date.as_str(),
            r.employee_band.as_deref().unwrap_or(""),
            band_year.as_str(),
            employer.as_str(),
            r.establishment_id.as_deref().unwrap_or(""),
            r.postal_code.as_deref().unwrap_or(""),
            r.commune.as_deref().unwrap_or(""),
            r.department.as_deref().unwrap_or(""),
            r.address.as_deref().unwrap_or(""),
            r.source.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use regscout_core::{Country, SEARCH_SOURCE};

    use super::*;

    fn record() -> CompanyRecord {
        CompanyRecord {
            country: Country::France,
            registry_id: "941429565".into(),
            establishment_id: Some("94142956500026".into()),
            name: "PIGMENT, SAS".into(),
            activity_code: Some("62.01Z".into()),
            creation_date: NaiveDate::from_ymd_opt(2025, 4, 1),
            address: Some("1 RUE X 75002 PARIS".into()),
            postal_code: Some("75002".into()),
            commune: Some("PARIS".into()),
            department: Some("75".into()),
            region: Some("11".into()),
            employee_band: Some("11".into()),
            employee_band_year: Some(2023),
            is_employer: Some(true),
            source: SEARCH_SOURCE.into(),
        }
    }

    #[test]
    fn csv_has_header_and_quotes_commas() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[record()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), CSV_HEADER.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "941429565,\"PIGMENT, SAS\",62.01Z,2025-04-01,11,2023,true,94142956500026,75002,PARIS,75,1 RUE X 75002 PARIS,recherche-entreprises.api.gouv.fr/search"
        );
    }

    #[test]
    fn csv_leaves_missing_values_empty() {
        let mut sparse = record();
        sparse.creation_date = None;
        sparse.is_employer = None;
        sparse.employee_band_year = None;
        let mut buf = Vec::new();
        write_csv(&mut buf, &[sparse]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.starts_with("941429565,\"PIGMENT, SAS\",62.01Z,,11,,,"));
    }

    #[test]
    fn table_shows_band_label_and_employer() {
        let mut buf = Vec::new();
        write_table(&mut buf, &[record()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("SIREN"));
        assert!(text.contains("10-19"));
        assert!(text.contains("yes"));
        assert!(text.contains("PIGMENT, SAS"));
    }

    #[test]
    fn empty_table_says_so() {
        let mut buf = Vec::new();
        write_table(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "no companies matched\n");
    }

    #[test]
    fn long_names_are_truncated() {
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("abc", 3), "abc");
    }
}
