use serde::{Deserialize, Serialize};

/// One variant of a registry search query.
///
/// Values are immutable once built. Two requests with identical fields are
/// still distinct sources when passed as separate list elements to the
/// collector, which tracks paging per list position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text term (`q`). May be empty when filters alone drive the search.
    #[serde(default)]
    pub term: String,
    /// NAF activity code filter (`activite_principale`).
    #[serde(default)]
    pub activity_code: Option<String>,
    /// Five-digit postal code filter (`code_postal`).
    #[serde(default)]
    pub postal_code: Option<String>,
    /// Comma-separated employee band codes (`tranche_effectif_salarie`).
    #[serde(default)]
    pub employee_band_codes: Option<String>,
    /// Administrative status (`etat_administratif`), `"A"` for active.
    #[serde(default)]
    pub administrative_status: Option<String>,
    /// Ask upstream for the reduced result shape.
    #[serde(default)]
    pub minimal: Option<bool>,
    /// Extra detail blocks to include (e.g. `"dirigeants,siege"`).
    /// Upstream only accepts this together with `minimal=true`.
    #[serde(default)]
    pub include: Option<String>,
}

impl SearchRequest {
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_activity_code(mut self, code: impl Into<String>) -> Self {
        self.activity_code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    #[must_use]
    pub fn with_employee_bands(mut self, codes: impl Into<String>) -> Self {
        self.employee_band_codes = Some(codes.into());
        self
    }

    #[must_use]
    pub fn with_administrative_status(mut self, status: impl Into<String>) -> Self {
        self.administrative_status = Some(status.into());
        self
    }

    #[must_use]
    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.include = Some(include.into());
        self
    }

    /// Short label for logs, e.g. `"q='' naf=62.01Z"`.
    #[must_use]
    pub fn label(&self) -> String {
        let mut label = format!("q='{}'", self.term);
        if let Some(code) = &self.activity_code {
            label.push_str(" naf=");
            label.push_str(code);
        }
        if let Some(postal) = &self.postal_code {
            label.push_str(" cp=");
            label.push_str(postal);
        }
        label
    }
}
