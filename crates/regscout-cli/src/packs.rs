use anyhow::Context;
use regscout_core::packs::builtin_packs;
use regscout_core::{load_query_packs, AppConfig, QueryPack};

/// Lists every pack `search --pack` accepts, with its search variants.
///
/// # Errors
///
/// Returns an error if the configured packs file cannot be loaded.
pub(crate) fn run_packs(config: &AppConfig) -> anyhow::Result<()> {
    let extra = match &config.query_packs_path {
        Some(path) => load_query_packs(path)
            .with_context(|| format!("loading query packs from {}", path.display()))?,
        None => Vec::new(),
    };

    for pack in &builtin_packs() {
        print_pack(pack, "built-in");
    }
    for pack in &extra {
        print_pack(pack, "file");
    }
    Ok(())
}

fn print_pack(pack: &QueryPack, origin: &str) {
    println!("{} ({origin}): {}", pack.name, pack.description);
    for search in &pack.searches {
        println!("  {}", search.label());
    }
}
