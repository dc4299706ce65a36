//! The seam between the collector and whatever serves search pages.

use std::future::Future;

use regscout_core::SearchRequest;

use crate::client::RegistryClient;
use crate::error::RegistryError;
use crate::types::SearchResponse;

/// Something that can serve one page of registry search results.
///
/// [`RegistryClient`] is the production implementation; tests substitute an
/// in-memory source to count and script page fetches.
pub trait PageSource {
    fn fetch_page(
        &self,
        request: &SearchRequest,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<SearchResponse, RegistryError>> + Send;
}

impl PageSource for RegistryClient {
    fn fetch_page(
        &self,
        request: &SearchRequest,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<SearchResponse, RegistryError>> + Send {
        self.search_page(request, page, per_page)
    }
}
