//! Jobharvest command-line entry point
//!
//! Two harvesting commands mirror the two pipeline phases: `links`
//! collects job links from the sites' listing pages, `details` revisits
//! stored links and extracts full postings. `stats` reports what the
//! database currently holds.

use clap::{Parser, Subcommand};
use jobharvest::config::load_config_with_hash;
use jobharvest::crawler::LinkCrawler;
use jobharvest::registry::Registry;
use jobharvest::scraper::DetailScraper;
use jobharvest::storage::{open_storage, DetailStore, LinkStore, SqliteStore};
use jobharvest::Site;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Jobharvest: a two-phase job posting collector
#[derive(Parser, Debug)]
#[command(name = "jobharvest")]
#[command(version)]
#[command(about = "Collects job links and posting details from known job sites", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the sites' listing pages and collect job links
    Links {
        /// Total number of job links to collect per site
        #[arg(long = "links", value_name = "N_LINKS")]
        n_links: usize,

        /// How many links to collect and save in one step
        #[arg(long, value_name = "BATCH_SIZE")]
        batch_size: usize,
    },

    /// Revisit stored links and extract full posting details
    Details {
        /// How many saved links to retrieve and scrape at once
        #[arg(long, value_name = "BATCH_SIZE")]
        batch_size: usize,
    },

    /// Show per-site record counts from the database
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_hash) = load_config_with_hash(&cli.config)?;

    setup_logging(cli.verbose, cli.quiet, config.log_level.as_deref());
    tracing::info!(
        "Loaded configuration from {} (hash {})",
        cli.config.display(),
        config_hash
    );

    let db_path = config.persistence.sqlite.db_file_location.clone();

    match cli.command {
        Command::Links {
            n_links,
            batch_size,
        } => handle_links(&db_path, n_links, batch_size).await?,
        Command::Details { batch_size } => handle_details(&db_path, batch_size).await?,
        Command::Stats => handle_stats(&db_path)?,
    }

    Ok(())
}

/// Sets up the tracing subscriber from CLI flags and the config fallback
fn setup_logging(verbose: u8, quiet: bool, config_level: Option<&str>) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match (verbose, config_level) {
            (0, Some(level)) => EnvFilter::new(format!("jobharvest={level},warn")),
            (0, None) => EnvFilter::new("jobharvest=info,warn"),
            (1, _) => EnvFilter::new("jobharvest=debug,info"),
            (_, _) => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Runs the link collection phase for every registered site
///
/// Each batch is saved as soon as it is produced, so a failure on a
/// later page leaves earlier batches committed.
async fn handle_links(db_path: &PathBuf, n_links: usize, batch_size: usize) -> anyhow::Result<()> {
    let mut store = open_storage(db_path)?;
    let registry = Registry::standard();

    for strategy in registry.link_strategies() {
        let site = strategy.site();
        let mut crawler = LinkCrawler::new(strategy);
        let mut crawl = crawler.crawl(batch_size, n_links)?;

        while let Some(batch) = crawl.next_batch().await? {
            store.save_links(&batch)?;
        }

        tracing::info!("{}: collected {} links", site, crawl.total_collected());
    }

    Ok(())
}

/// Runs the detail extraction phase over all stored links
///
/// Walks each site's stored links in fixed-size pages: the row count is
/// read once and the offset advances by `batch_size` until it passes
/// the count. Rows are assumed not to disappear during the walk.
async fn handle_details(db_path: &PathBuf, batch_size: usize) -> anyhow::Result<()> {
    let mut store = open_storage(db_path)?;
    let registry = Registry::standard();

    for strategy in registry.detail_strategies() {
        let site = strategy.site();
        tracing::info!("Starting scraper {} for site {}", strategy.name(), site);
        let scraper = DetailScraper::new(strategy);

        let total = store.count(site)?;
        let mut offset = 0;
        while offset < total {
            let links = store.get_batch(site, batch_size, offset)?;
            let details = scraper.scrape(&links).await?;
            tracing::info!("Extracted {} details for {}", details.len(), site);
            store.save_details(&details)?;
            offset += batch_size;
        }
    }

    Ok(())
}

/// Prints per-site link and detail counts
fn handle_stats(db_path: &PathBuf) -> anyhow::Result<()> {
    let store: SqliteStore = open_storage(db_path)?;

    println!("Database: {}\n", db_path.display());
    println!("{:<12} {:>8} {:>8}", "site", "links", "details");
    for site in Site::ALL {
        println!(
            "{:<12} {:>8} {:>8}",
            site.as_str(),
            store.count(site)?,
            store.count_details(site)?
        );
    }

    Ok(())
}
