//! Single-variant paging loop for `RegistryClient`.

use regscout_core::SearchRequest;

use crate::error::RegistryError;
use crate::types::SearchResult;

use super::RegistryClient;

impl RegistryClient {
    /// Fetches every page of one search variant, up to `max_pages` when set.
    ///
    /// Results are returned in upstream order without filtering or
    /// deduplication. Use [`crate::collect_companies`] when several variants
    /// and post-filters are involved.
    ///
    /// **All-or-nothing semantics**: a failure on any page discards the
    /// results of earlier pages and returns the error.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::search_page`].
    pub async fn fetch_all_results(
        &self,
        request: &SearchRequest,
        per_page: u32,
        max_pages: Option<u32>,
    ) -> Result<Vec<SearchResult>, RegistryError> {
        let mut results = Vec::new();
        let mut page = 1u32;

        loop {
            let response = self.search_page(request, page, per_page).await?;
            results.extend(response.results);

            if max_pages.is_some_and(|max| page >= max) || page >= response.total_pages {
                break;
            }
            page += 1;
        }

        Ok(results)
    }
}
