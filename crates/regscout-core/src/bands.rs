//! Employee band codes used by the registry (`tranche_effectif_salarie`).

const EMPLOYEE_BAND_LABELS: &[(&str, &str)] = &[
    ("00", "0"),
    ("01", "1-2"),
    ("02", "3-5"),
    ("03", "6-9"),
    ("11", "10-19"),
    ("12", "20-49"),
    ("21", "50-99"),
    ("22", "100-199"),
    ("31", "200-249"),
    ("32", "250-499"),
    ("41", "500-999"),
    ("42", "1000-1999"),
    ("51", "2000-4999"),
    ("52", "5000-9999"),
    ("53", "10000+"),
    ("NN", "unknown"),
];

/// Bands covering companies with fewer than 20 employees.
pub const UNDER_20_EMPLOYEES: &str = "00,01,02,03,11";

/// Maps a band code to a human-readable headcount range.
///
/// Unknown codes are returned unchanged so new upstream codes still display.
#[must_use]
pub fn employee_band_label(code: Option<&str>) -> Option<&str> {
    let code = code?;
    Some(
        EMPLOYEE_BAND_LABELS
            .iter()
            .find(|(c, _)| *c == code)
            .map_or(code, |(_, label)| *label),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_codes() {
        assert_eq!(employee_band_label(Some("12")), Some("20-49"));
        assert_eq!(employee_band_label(Some("11")), Some("10-19"));
        assert_eq!(employee_band_label(Some("02")), Some("3-5"));
        assert_eq!(employee_band_label(Some("NN")), Some("unknown"));
    }

    #[test]
    fn none_stays_none() {
        assert_eq!(employee_band_label(None), None);
    }

    #[test]
    fn unknown_code_is_echoed() {
        assert_eq!(employee_band_label(Some("99")), Some("99"));
    }
}
