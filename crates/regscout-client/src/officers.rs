use crate::types::Officer;

const NATURAL_PERSON: &str = "personne physique";

impl Officer {
    /// Whether this officer is a natural person rather than a company.
    #[must_use]
    pub fn is_natural_person(&self) -> bool {
        self.officer_type
            .as_deref()
            .is_some_and(|t| t.trim().to_lowercase() == NATURAL_PERSON)
    }

    /// `"First Names LAST"` for people, the registered name for companies.
    /// Empty when upstream sent neither.
    #[must_use]
    pub fn display_name(&self) -> String {
        let person = [self.first_names.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !person.is_empty() {
            return person;
        }
        self.company_name
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_owned()
    }
}

/// Officers that are natural persons, in upstream order.
#[must_use]
pub fn natural_person_officers(officers: &[Officer]) -> Vec<&Officer> {
    officers.iter().filter(|o| o.is_natural_person()).collect()
}
