//! `regscout company`: one company's registry details and its officers.

use anyhow::bail;
use chrono::{Local, NaiveDate};
use regscout_client::{natural_person_officers, normalize_result, Officer, RegistryClient};
use regscout_core::{employee_band_label, AppConfig, CompanyRecord};

/// # Errors
///
/// Returns an error if the SIREN is malformed, the lookup fails, or no
/// company is found.
pub(crate) async fn run_company(
    config: &AppConfig,
    siren: &str,
    json: bool,
) -> anyhow::Result<()> {
    let siren = siren.trim();
    if siren.len() != 9 || !siren.chars().all(|c| c.is_ascii_digit()) {
        bail!("SIREN must be 9 digits, got '{siren}'");
    }

    let client = RegistryClient::from_config(config)?;
    let Some(result) = client.fetch_company(siren).await? else {
        bail!("no company found for SIREN {siren}");
    };

    let officers = result.officers.clone().unwrap_or_default();
    let finances = result.finances.clone();
    let record = normalize_result(result);

    if json {
        let value = serde_json::json!({
            "record": serde_json::to_value(&record)?,
            "officers": officers.iter().map(officer_json).collect::<Vec<_>>(),
            "finances": finances,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{} ({})", record.name, record.registry_id);
    println!("  NAF:        {}", record.activity_code.as_deref().unwrap_or("-"));
    println!(
        "  Created:    {}",
        record
            .creation_date
            .map_or_else(|| "-".to_owned(), |d| d.to_string())
    );
    println!("  Age:        {}", format_age(&record, Local::now().date_naive()));
    println!("  Address:    {}", record.address.as_deref().unwrap_or("-"));
    println!(
        "  Headcount:  {}",
        employee_band_label(record.employee_band.as_deref()).unwrap_or("-")
    );
    println!("  Registry:   {}", record.registry_url());

    // Holding-only boards fall back to every officer.
    let people = natural_person_officers(&officers);
    let shown: Vec<&Officer> = if people.is_empty() {
        officers.iter().collect()
    } else {
        people
    };

    println!();
    if shown.is_empty() {
        println!("no officers listed");
        return Ok(());
    }
    println!("{:<36}{:<32}BORN", "OFFICER", "ROLE");
    for officer in shown {
        println!(
            "{:<36}{:<32}{}",
            officer.display_name(),
            officer.role.as_deref().unwrap_or("-"),
            officer
                .birth_year
                .as_deref()
                .or(officer.birth_date.as_deref())
                .unwrap_or("-")
        );
    }
    Ok(())
}

fn format_age(record: &CompanyRecord, today: NaiveDate) -> String {
    match record.age_years(today) {
        Some(1) => "1 year".to_owned(),
        Some(years) => format!("{years} years"),
        None => "-".to_owned(),
    }
}

fn officer_json(officer: &Officer) -> serde_json::Value {
    serde_json::json!({
        "name": officer.display_name(),
        "type": officer.officer_type,
        "role": officer.role,
        "birth_year": officer.birth_year,
        "nationality": officer.nationality,
    })
}
