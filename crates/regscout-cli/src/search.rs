//! `regscout search`: pack expansion, cached collection, and display.

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use regscout_client::{collect_companies, CollectOptions, RegistryClient, PER_PAGE_MAX};
use regscout_core::packs::{BLOSSOM_LIKE_FRANCE, PARIS_POSTAL_PREFIX};
use regscout_core::{
    get_query_pack, load_query_packs, normalize_activity_codes, paginate, years_ago, AppConfig,
    CacheKey, CompanyRecord, EmployerFilter, QueryPack, RecordCache, SearchOverrides,
    SearchRequest,
};

use crate::output::{print_records, OutputFormat};

/// Default look-back window for the creation-date filter.
const FOUNDED_WITHIN_YEARS: u32 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum EmployerArg {
    #[default]
    Any,
    Yes,
    No,
}

impl From<EmployerArg> for EmployerFilter {
    fn from(arg: EmployerArg) -> Self {
        match arg {
            EmployerArg::Any => EmployerFilter::Any,
            EmployerArg::Yes => EmployerFilter::Yes,
            EmployerArg::No => EmployerFilter::No,
        }
    }
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Query pack to expand into search variants
    #[arg(long, default_value = BLOSSOM_LIKE_FRANCE)]
    pub pack: String,
    /// Keep only companies whose postal code starts with 75
    #[arg(long)]
    pub paris_only: bool,
    /// Number of companies to collect
    #[arg(long, default_value_t = 50)]
    pub target: usize,
    /// Free-text search term (name, keyword)
    #[arg(long)]
    pub q: Option<String>,
    /// Activity (NAF) codes, comma-separated; replaces the pack's codes
    #[arg(long)]
    pub naf: Option<String>,
    /// Headcount band codes, comma-separated (e.g. 00,01,02,03,11)
    #[arg(long)]
    pub employee_bands: Option<String>,
    /// Administrative status: A (active) or C (closed)
    #[arg(long)]
    pub status: Option<String>,
    /// Results per upstream page (1-25)
    #[arg(long, default_value_t = PER_PAGE_MAX)]
    pub per_page: u32,
    /// Page cap per search variant; 0 pages until exhausted
    #[arg(long, default_value_t = 0)]
    pub max_pages: u32,
    /// Keep only postal codes with this prefix; overrides --paris-only
    #[arg(long)]
    pub postal_prefix: Option<String>,
    /// Keep only companies created within this many years; 0 disables
    #[arg(long, default_value_t = FOUNDED_WITHIN_YEARS)]
    pub founded_within_years: u32,
    /// Employer flag filter
    #[arg(long, value_enum, default_value_t = EmployerArg::Any)]
    pub employer: EmployerArg,
    /// Bypass the on-disk result cache
    #[arg(long)]
    pub no_cache: bool,
    /// Page of results to display (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    /// Results per displayed page
    #[arg(long, default_value_t = 10)]
    pub page_size: usize,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl SearchArgs {
    fn postal_code_prefix(&self) -> Option<String> {
        self.postal_prefix
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned)
            .or_else(|| self.paris_only.then(|| PARIS_POSTAL_PREFIX.to_owned()))
    }

    fn max_pages_per_request(&self) -> Option<u32> {
        (self.max_pages > 0).then_some(self.max_pages)
    }

    fn min_creation_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        (self.founded_within_years > 0).then(|| years_ago(today, self.founded_within_years))
    }

    fn collect_options(&self, today: NaiveDate) -> CollectOptions {
        CollectOptions {
            target_count: self.target,
            per_page: self.per_page,
            max_pages_per_request: self.max_pages_per_request(),
            postal_code_prefix: self.postal_code_prefix(),
            min_creation_date: self.min_creation_date(today),
        }
    }

    /// Every parameter that changes the collected set, in a stable order.
    fn cache_key(&self, naf_codes: &[String]) -> String {
        let term: String = self.q.as_deref().unwrap_or("").trim().chars().take(24).collect();
        CacheKey::new(format!("fr-{}", self.pack))
            .part("paris", u8::from(self.paris_only))
            .part("n", self.target)
            .part("q", term)
            .part("naf", naf_codes.join(","))
            .opt_part("eff", self.employee_bands.as_deref())
            .opt_part("etat", self.status.as_deref())
            .part("pp", self.per_page)
            .opt_part("mp", self.max_pages_per_request())
            .opt_part("pc", self.postal_code_prefix())
            .part("fy", self.founded_within_years)
            .part("emp", EmployerFilter::from(self.employer))
            .build()
    }
}

/// Resolves the pack named on the command line and applies the overrides.
///
/// # Errors
///
/// Fails on an unknown pack, an unreadable packs file, or malformed
/// activity codes.
fn build_searches(
    config: &AppConfig,
    args: &SearchArgs,
) -> anyhow::Result<(QueryPack, Vec<String>, Vec<SearchRequest>)> {
    let extra = match &config.query_packs_path {
        Some(path) => load_query_packs(path)
            .with_context(|| format!("loading query packs from {}", path.display()))?,
        None => Vec::new(),
    };
    let pack = get_query_pack(&args.pack, &extra)?;

    let (naf_codes, invalid) = normalize_activity_codes(args.naf.as_deref().unwrap_or(""));
    if !invalid.is_empty() {
        bail!(
            "invalid NAF code(s): {}; expected a format like 62.01Z",
            invalid.join(", ")
        );
    }

    let overrides = SearchOverrides {
        term: args.q.clone(),
        activity_codes: naf_codes.clone(),
        employee_band_codes: non_blank(args.employee_bands.as_deref()),
        administrative_status: non_blank(args.status.as_deref()),
    };
    let searches = overrides.apply(&pack.searches);
    Ok((pack, naf_codes, searches))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_owned)
}

/// Newest companies first; undated ones last.
fn sort_newest_first(records: &mut [CompanyRecord]) {
    records.sort_by(|a, b| b.creation_date.cmp(&a.creation_date));
}

/// Collects (or loads from cache), filters, and prints one page of results.
///
/// # Errors
///
/// Returns an error on invalid arguments, cache I/O failure, or any
/// registry failure during collection.
pub(crate) async fn run_search(config: &AppConfig, args: &SearchArgs) -> anyhow::Result<()> {
    if args.per_page == 0 || args.per_page > PER_PAGE_MAX {
        bail!("--per-page must be between 1 and {PER_PAGE_MAX}");
    }
    let (pack, naf_codes, searches) = build_searches(config, args)?;

    let cache = RecordCache::new(&config.cache_dir);
    let key = args.cache_key(&naf_codes);

    let cached = if args.no_cache {
        None
    } else {
        // An empty cached list is treated as a miss.
        cache.load(&key)?.filter(|records| !records.is_empty())
    };

    let mut records = if let Some(mut records) = cached {
        tracing::info!(key = %key, count = records.len(), "using cached results");
        records.truncate(args.target);
        records
    } else {
        let today = Local::now().date_naive();
        let options = args.collect_options(today);
        tracing::info!(
            pack = %pack.name,
            variants = searches.len(),
            target = options.target_count,
            employer = %EmployerFilter::from(args.employer),
            "collecting companies"
        );

        let client = RegistryClient::from_config(config)?;
        let collected = collect_companies(&client, &searches, &options).await?;
        let records = EmployerFilter::from(args.employer).apply(collected);

        if !args.no_cache {
            cache.save(&key, &records)?;
        }
        records
    };

    sort_newest_first(&mut records);
    let (page, total_pages) = paginate(&records, args.page, args.page_size)?;
    print_records(page, args.format)?;

    if args.format == OutputFormat::Table {
        println!();
        println!(
            "{} companies, page {} of {}",
            records.len(),
            args.page.clamp(1, total_pages.max(1)),
            total_pages
        );
    }

    Ok(())
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
