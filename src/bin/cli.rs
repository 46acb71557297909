//! news-digest CLI
//!
//! Intended to be invoked by a scheduler (cron, CI job); each `run` is one
//! pass over the listing page.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use news_digest::{
    error::Result,
    models::Config,
    pipeline::{self, RunOptions},
    storage::{BatchJournal, DocumentStore, LocalStorage, SeenSetStore},
    utils::http,
};

/// news-digest - Incremental News Digest
#[derive(Parser, Debug)]
#[command(
    name = "news-digest",
    version,
    about = "Appends newly published articles to a markdown digest"
)]
struct Cli {
    /// Directory holding config.toml, the seen-set and the document
    #[arg(short, long, default_value = ".")]
    storage_dir: PathBuf,

    /// Path to the config file (default: {storage_dir}/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the listing and merge new articles into the document
    Run {
        /// Print the formatted batch instead of writing it
        #[arg(long)]
        dry_run: bool,

        /// Override source.listing_url
        #[arg(long)]
        listing_url: Option<String>,
    },

    /// Validate configuration
    Validate,

    /// Show storage state
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.storage_dir.join("config.toml"));
    let mut config = Config::load_or_default(&config_path);
    let storage = LocalStorage::new(&cli.storage_dir, config.paths.clone());

    match cli.command {
        Command::Run {
            dry_run,
            listing_url,
        } => {
            if let Some(url) = listing_url {
                config.source.listing_url = url;
            }
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }

            let client = http::create_async_client(&config.crawler)?;
            let report =
                match pipeline::run_sync(&config, &client, &storage, RunOptions { dry_run }).await
                {
                    Ok(report) => report,
                    Err(e) => {
                        log::error!("Run failed: {}", e);
                        return Err(e);
                    }
                };

            if report.recovered {
                log::info!("Completed an interrupted commit from a previous run");
            }
            if report.new_items == 0 {
                log::info!("No new news to add.");
            } else if dry_run {
                println!("{}", report.block.trim());
            } else {
                log::info!(
                    "Added {} new news articles to {}.",
                    report.new_items,
                    config.paths.document
                );
            }
            log::info!(
                "Listed {}, skipped {}, detail failures {}, recorded {}",
                report.listed,
                report.skipped,
                report.detail_failures,
                report.recorded
            );
        }

        Command::Validate => {
            log::info!("Validating configuration from {}...", config_path.display());

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK (listing {})", config.source.listing_url);
        }

        Command::Info => {
            log::info!("Storage directory: {}", storage.root_dir().display());
            log::info!(
                "Recorded articles: {}",
                storage.load_seen().await.len()
            );
            let document_path = config.paths.document_path(storage.root_dir());
            match storage.read_document().await {
                Some(text) => log::info!(
                    "Document: {} ({} bytes)",
                    document_path.display(),
                    text.len()
                ),
                None => log::info!("Document: {} (not found)", document_path.display()),
            }
            match storage.read_pending().await {
                Some(batch) => log::warn!(
                    "Pending commit of {} articles from {} (completed on next run)",
                    batch.identifiers.len(),
                    batch.created_at
                ),
                None => log::info!("No pending commit."),
            }
        }
    }

    Ok(())
}
