//! `regscout social`: profile search queries for a company officer.

use clap::{Args, ValueEnum};
use regscout_client::{
    google_search_url, linkedin_people_query, x_people_query, SocialSearchClient,
};
use regscout_core::AppConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SocialKind {
    #[default]
    Linkedin,
    X,
}

#[derive(Debug, Args)]
pub struct SocialArgs {
    /// Person's full name
    #[arg(long)]
    pub person: String,
    /// Company the person is associated with
    #[arg(long, default_value = "")]
    pub company: String,
    /// Network to target
    #[arg(long, value_enum, default_value_t = SocialKind::Linkedin)]
    pub kind: SocialKind,
    /// Maximum provider candidates to show
    #[arg(long, default_value_t = 5)]
    pub max_results: usize,
}

pub(crate) fn build_query(args: &SocialArgs) -> String {
    match args.kind {
        SocialKind::Linkedin => linkedin_people_query(&args.person, &args.company),
        SocialKind::X => x_people_query(&args.person, &args.company),
    }
}

/// # Errors
///
/// Returns an error if the configured search provider request fails.
pub(crate) async fn run_social(config: &AppConfig, args: &SocialArgs) -> anyhow::Result<()> {
    let query = build_query(args);
    println!("query:  {query}");
    println!("google: {}", google_search_url(&query));

    let client = SocialSearchClient::from_config(config)?;
    if !client.is_configured() {
        tracing::info!("no search provider configured; skipping candidate lookup");
        return Ok(());
    }

    let candidates = client.search_candidates(&query, args.max_results).await?;
    println!();
    if candidates.is_empty() {
        println!("no candidates found");
    }
    for candidate in &candidates {
        println!("{}\n  {}", candidate.title, candidate.url);
        if let Some(snippet) = &candidate.snippet {
            println!("  {snippet}");
        }
    }
    Ok(())
}
