//! Single-company detail lookup.

use regscout_core::SearchRequest;

use crate::error::RegistryError;
use crate::types::SearchResult;

use super::RegistryClient;

/// Detail blocks requested for a company lookup.
const COMPANY_DETAIL_INCLUDE: &str = "dirigeants,siege,complements,finances";

/// Upstream matches `q` fuzzily, so a SIREN can rank below other hits.
const COMPANY_LOOKUP_RESULTS: u32 = 5;

impl RegistryClient {
    /// Looks a company up by SIREN, including officers and financials.
    ///
    /// Upstream search is fuzzy, so the result whose SIREN matches exactly is
    /// preferred; otherwise the first result is returned.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::search_page`].
    pub async fn fetch_company(
        &self,
        registry_id: &str,
    ) -> Result<Option<SearchResult>, RegistryError> {
        let request = SearchRequest::new(registry_id.trim()).with_include(COMPANY_DETAIL_INCLUDE);
        let response = self
            .search_page(&request, 1, COMPANY_LOOKUP_RESULTS)
            .await?;

        let wanted = registry_id.trim();
        let mut results = response.results;
        let exact = results.iter().position(|r| r.registry_id == wanted);
        Ok(match exact {
            Some(idx) => Some(results.swap_remove(idx)),
            None => results.into_iter().next(),
        })
    }
}
