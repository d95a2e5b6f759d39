//! VosDroits command-line entry point
//!
//! Runs one lookup against service-public.gouv.fr or impots.gouv.fr and prints the
//! result to stdout. Logs go to stderr.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vosdroits::config::load_config_or_default;
use vosdroits::output::{format_markdown, Operation, Report};
use vosdroits::{CancellationToken, Config, SiteClient, SiteId, VosDroitsError};

/// VosDroits: structured lookups on French public service websites
#[derive(Parser, Debug)]
#[command(name = "vosdroits")]
#[command(version = "1.0.0")]
#[command(about = "Search procedures and read guides on French public service websites", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Target site
    #[arg(long, default_value = "service-public", global = true)]
    site: SiteId,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    /// Render results as markdown instead of JSON
    #[arg(long, global = true)]
    markdown: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search procedures or tax documents
    Search {
        query: String,

        /// Maximum number of results (1-100)
        #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
        limit: i64,
    },

    /// Fetch one document
    Article { url: String },

    /// List top-level categories
    Categories,

    /// List life events (service-public only)
    LifeEvents,

    /// Fetch a life-event guide (service-public only)
    LifeEvent { url: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Invalid configuration from environment".to_string(),
    })?;

    setup_logging(cli.verbose, cli.quiet, &config);
    tracing::info!("Using {} with {}", cli.site, config.user_agent.header_value());

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let report = match run(&cli, &config, &cancel).await {
        Ok(report) => report,
        Err(e) => match e.downcast_ref::<VosDroitsError>() {
            Some(error) => {
                tracing::error!(kind = error.kind(), "{}", error);
                std::process::exit(exit_code(error));
            }
            None => return Err(e),
        },
    };

    if !cli.quiet {
        eprintln!("{}", report.summary());
    }
    if cli.markdown {
        print!("{}", format_markdown(&report));
    } else {
        println!("{}", report.to_json()?);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Without flags the configured level applies; `RUST_LOG` is not consulted.
fn setup_logging(verbose: u8, quiet: bool, config: &Config) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new(format!("vosdroits={},warn", config.logging.level)),
            1 => EnvFilter::new("vosdroits=debug,info"),
            2 => EnvFilter::new("vosdroits=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Cancels the in-flight call on Ctrl-C
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling");
            cancel.cancel();
        }
    });
}

async fn run(cli: &Cli, config: &Config, cancel: &CancellationToken) -> anyhow::Result<Report> {
    let client = SiteClient::for_site(config, cli.site).context("Failed to build HTTP client")?;
    let site = cli.site;

    let report = match &cli.command {
        Command::Search { query, limit } => {
            if query.trim().is_empty() {
                bail!("query must not be empty");
            }
            let results = client.search(query, *limit, cancel).await?;
            Report::new(site, Operation::Search, results)
        }
        Command::Article { url } => {
            require_url(url)?;
            let article = client.get_document(url, cancel).await?;
            Report::new(site, Operation::Document, [article])
        }
        Command::Categories => {
            let categories = client.list_categories(cancel).await?;
            Report::new(site, Operation::Categories, categories)
        }
        Command::LifeEvents => {
            let events = client.list_life_events(cancel).await?;
            Report::new(site, Operation::LifeEvents, events)
        }
        Command::LifeEvent { url } => {
            require_url(url)?;
            let detail = client.get_life_event_detail(url, cancel).await?;
            Report::new(site, Operation::LifeEventDetail, [detail])
        }
    };

    Ok(report)
}

/// Invalid input exits with 2, an interrupted call with 130, anything else with 1
fn exit_code(error: &VosDroitsError) -> i32 {
    if error.is_terminal() {
        2
    } else if matches!(error, VosDroitsError::Cancelled) {
        130
    } else {
        1
    }
}

fn require_url(url: &str) -> anyhow::Result<()> {
    if url.trim().is_empty() {
        bail!("url must not be empty");
    }
    Ok(())
}
