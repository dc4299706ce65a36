mod company;
mod output;
mod packs;
mod search;
mod social;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "regscout")]
#[command(about = "Find young French companies in the public company registry")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect companies matching a query pack and post-filters
    Search(search::SearchArgs),
    /// List built-in and configured query packs
    Packs,
    /// Show one company's details and officers
    Company {
        /// SIREN (9-digit company identifier)
        siren: String,
        /// Print the raw registry result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build public-profile search queries for a person
    Social(social::SocialArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = regscout_core::load_app_config()?;

    // Logs go to stderr so stdout stays clean for JSON/CSV output.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Some(Commands::Search(args)) => search::run_search(&config, &args).await?,
        Some(Commands::Packs) => packs::run_packs(&config)?,
        Some(Commands::Company { siren, json }) => {
            company::run_company(&config, &siren, json).await?;
        }
        Some(Commands::Social(args)) => social::run_social(&config, &args).await?,
        None => Cli::command().print_help()?,
    }

    Ok(())
}
