//! Round-robin collection across several search variants.
//!
//! A fixed "fetch N pages, then filter" strategy falls short whenever the
//! post-filters are selective. [`collect_companies`] instead fetches pages
//! lazily and filters eagerly, stopping as soon as enough records have
//! passed the filters or every variant has run out of pages.
//!
//! ## Order of work
//!
//! 1. Page 1 of every variant, in list order (this also learns each
//!    variant's page count).
//! 2. Those first pages go through the gate, in list order.
//! 3. Rounds: each variant that still has pages within its cap fetches its
//!    next page, in list order, until the target is met or a whole round
//!    fetches nothing.
//!
//! Fetches are strictly sequential. Once the target is met no further
//! request is issued.

use std::collections::HashSet;

use chrono::NaiveDate;
use regscout_core::{CompanyRecord, SearchRequest};

use crate::client::PER_PAGE_MAX;
use crate::error::RegistryError;
use crate::normalize::normalize_result;
use crate::source::PageSource;
use crate::types::SearchResult;

/// Parameters of one collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectOptions {
    /// Stop once this many records have passed the filters.
    pub target_count: usize,
    pub per_page: u32,
    /// Per-variant page cap. Page 1 is always consumed, so values below 1
    /// behave as 1. `None` pages until the variant is exhausted.
    pub max_pages_per_request: Option<u32>,
    /// Keep only records whose postal code starts with this prefix.
    pub postal_code_prefix: Option<String>,
    /// Keep only records created on or after this date.
    pub min_creation_date: Option<NaiveDate>,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            target_count: 50,
            per_page: PER_PAGE_MAX,
            max_pages_per_request: Some(2),
            postal_code_prefix: None,
            min_creation_date: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    HasMorePages,
    /// Stopped by `max_pages_per_request` while upstream still has pages.
    Capped,
    Exhausted,
}

/// Paging position of one variant, indexed by its position in the request
/// list. Structurally equal requests each get their own cursor.
#[derive(Debug)]
struct Cursor {
    next_page: u32,
    total_pages: u32,
}

impl Cursor {
    fn state(&self, cap: Option<u32>) -> CursorState {
        if self.next_page > self.total_pages {
            CursorState::Exhausted
        } else if cap.is_some_and(|cap| self.next_page > cap.max(1)) {
            CursorState::Capped
        } else {
            CursorState::HasMorePages
        }
    }
}

/// Dedup and filter gate. Owns everything accepted so far.
struct Gate<'a> {
    options: &'a CollectOptions,
    seen: HashSet<String>,
    accepted: Vec<CompanyRecord>,
}

impl<'a> Gate<'a> {
    fn new(options: &'a CollectOptions) -> Self {
        Self {
            options,
            seen: HashSet::new(),
            accepted: Vec::with_capacity(options.target_count),
        }
    }

    fn target_reached(&self) -> bool {
        self.accepted.len() >= self.options.target_count
    }

    /// Runs one page through the gate in upstream order. Returns `true` the
    /// moment the target is reached; the rest of the page is dropped.
    fn admit_page(&mut self, results: Vec<SearchResult>) -> bool {
        for raw in results {
            if self.seen.contains(&raw.registry_id) {
                continue;
            }
            let record = normalize_result(raw);
            if !self.passes_filters(&record) {
                continue;
            }
            self.seen.insert(record.registry_id.clone());
            self.accepted.push(record);
            if self.target_reached() {
                return true;
            }
        }
        false
    }

    fn passes_filters(&self, record: &CompanyRecord) -> bool {
        if let Some(min) = self.options.min_creation_date {
            if !record.creation_date.is_some_and(|created| created >= min) {
                return false;
            }
        }
        if let Some(prefix) = self
            .options
            .postal_code_prefix
            .as_deref()
            .filter(|p| !p.is_empty())
        {
            if !record
                .postal_code
                .as_deref()
                .is_some_and(|postal| postal.starts_with(prefix))
            {
                return false;
            }
        }
        true
    }
}

/// Collects up to `options.target_count` filtered, deduplicated records
/// from `requests`, paging round-robin across them.
///
/// The output keeps first-accepted order and never contains two records with
/// the same `registry_id`. A shorter output than the target means every
/// variant ran out of pages (or hit its cap); that is not an error.
///
/// # Errors
///
/// Any error from `source` aborts the run and is returned unchanged; records
/// gathered so far are discarded.
pub async fn collect_companies<S>(
    source: &S,
    requests: &[SearchRequest],
    options: &CollectOptions,
) -> Result<Vec<CompanyRecord>, RegistryError>
where
    S: PageSource + ?Sized,
{
    if options.target_count == 0 || requests.is_empty() {
        return Ok(Vec::new());
    }

    let cap = options.max_pages_per_request;
    let mut pages_fetched = 0usize;

    let mut cursors = Vec::with_capacity(requests.len());
    let mut first_pages = Vec::with_capacity(requests.len());
    for request in requests {
        let response = source.fetch_page(request, 1, options.per_page).await?;
        pages_fetched += 1;
        cursors.push(Cursor {
            next_page: 1,
            total_pages: response.total_pages,
        });
        first_pages.push(response.results);
    }

    let mut gate = Gate::new(options);

    for (idx, results) in first_pages.into_iter().enumerate() {
        let reached = gate.admit_page(results);
        cursors[idx].next_page = 2;
        tracing::debug!(
            request = %requests[idx].label(),
            page = 1,
            accepted = gate.accepted.len(),
            "processed first page"
        );
        if reached {
            log_summary(requests.len(), pages_fetched, &gate, "target reached");
            return Ok(gate.accepted);
        }
    }

    loop {
        let mut progressed = false;

        for (request, cursor) in requests.iter().zip(cursors.iter_mut()) {
            if cursor.state(cap) != CursorState::HasMorePages {
                continue;
            }

            let page = cursor.next_page;
            let response = source.fetch_page(request, page, options.per_page).await?;
            pages_fetched += 1;
            progressed = true;

            let reached = gate.admit_page(response.results);
            cursor.next_page = page + 1;
            tracing::debug!(
                request = %request.label(),
                page,
                total_pages = cursor.total_pages,
                accepted = gate.accepted.len(),
                "processed page"
            );
            if reached {
                log_summary(requests.len(), pages_fetched, &gate, "target reached");
                return Ok(gate.accepted);
            }
        }

        if !progressed {
            break;
        }
    }

    let capped = cursors
        .iter()
        .filter(|c| c.state(cap) == CursorState::Capped)
        .count();
    tracing::debug!(capped, "no variant has pages left within its cap");
    log_summary(requests.len(), pages_fetched, &gate, "sources exhausted");
    Ok(gate.accepted)
}

fn log_summary(requests: usize, pages_fetched: usize, gate: &Gate<'_>, outcome: &str) {
    tracing::info!(
        requests,
        pages_fetched,
        accepted = gate.accepted.len(),
        target = gate.options.target_count,
        outcome,
        "collection finished"
    );
}

#[cfg(test)]
#[path = "collector_test.rs"]
mod tests;
