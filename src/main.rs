//! Page-Harvest main entry point
//!
//! This is the command-line interface for the Page-Harvest crawler.

use anyhow::{Context, Result};
use clap::Parser;
use page_harvest::config::{
    load_settings, ClientConfig, CrawlConfig, Settings, DEFAULT_DELAY_SECONDS,
    DEFAULT_JITTER_SECONDS, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT_SECONDS,
};
use page_harvest::output::{print_statistics, CsvExporter, ExportFormat, Exporter, JsonExporter};
use page_harvest::{Coordinator, PageRecord};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Page-Harvest: a polite single-site crawler
///
/// Page-Harvest walks one website breadth-first from a seed URL, stays on the
/// seed's domain, waits between requests, and exports the title, headings,
/// paragraphs, links and images of every page it fetches.
#[derive(Parser, Debug)]
#[command(name = "page-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A polite single-site crawler", long_about = None)]
struct Cli {
    /// Seed URL; `https://` is assumed when no scheme is given
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Maximum number of pages to crawl [default: 10]
    #[arg(short = 'n', long)]
    max_pages: Option<u32>,

    /// Delay between requests in seconds [default: 1.0]
    #[arg(short, long)]
    delay: Option<f64>,

    /// Upper bound of the random jitter added to each delay [default: 0.5]
    #[arg(long)]
    jitter: Option<f64>,

    /// Request timeout in seconds [default: 10]
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Path to an optional TOML settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Export format [default: both]
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Path of the JSON export (timestamped name when omitted)
    #[arg(long, value_name = "PATH")]
    json_out: Option<PathBuf>,

    /// Path of the CSV export (timestamped name when omitted)
    #[arg(long, value_name = "PATH")]
    csv_out: Option<PathBuf>,

    /// Also write log output to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Skip the statistics block after the crawl
    #[arg(long)]
    no_stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Everything a run needs once flags and settings are merged
#[derive(Debug, Clone, PartialEq)]
struct RunOptions {
    crawl: CrawlConfig,
    client: ClientConfig,
    format: ExportFormat,
    json_out: Option<PathBuf>,
    csv_out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let settings = match &cli.config {
        Some(path) => {
            tracing::info!("Loading settings from: {}", path.display());
            load_settings(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?
        }
        None => Settings::default(),
    };

    let options = merge_options(&cli, settings)?;
    handle_crawl(options, cli.no_stats).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// When `log_file` is given a second, uncolored layer appends to it.
fn setup_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_harvest=info,warn"),
            1 => EnvFilter::new("page_harvest=debug,info"),
            2 => EnvFilter::new("page_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false);

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

/// Prepends `https://` when the URL carries no http(s) scheme
fn ensure_scheme(url: &str) -> String {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Merges command-line flags over settings-file values over defaults
fn merge_options(cli: &Cli, settings: Settings) -> Result<RunOptions> {
    let seed = cli
        .url
        .clone()
        .or(settings.crawler.seed_url)
        .context("No seed URL given on the command line or in the settings file")?;

    let crawl = CrawlConfig {
        seed_url: ensure_scheme(&seed),
        max_pages: cli
            .max_pages
            .or(settings.crawler.max_pages)
            .unwrap_or(DEFAULT_MAX_PAGES),
        delay_seconds: cli
            .delay
            .or(settings.crawler.delay_seconds)
            .unwrap_or(DEFAULT_DELAY_SECONDS),
        jitter_seconds: cli
            .jitter
            .or(settings.crawler.jitter_seconds)
            .unwrap_or(DEFAULT_JITTER_SECONDS),
    };

    let defaults = ClientConfig::default();
    let client = ClientConfig {
        timeout_seconds: cli
            .timeout
            .or(settings.client.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        user_agents: settings.client.user_agents.unwrap_or(defaults.user_agents),
    };

    Ok(RunOptions {
        crawl,
        client,
        format: cli
            .format
            .or(settings.output.format)
            .unwrap_or(ExportFormat::Both),
        json_out: cli
            .json_out
            .clone()
            .or(settings.output.json_path.map(PathBuf::from)),
        csv_out: cli
            .csv_out
            .clone()
            .or(settings.output.csv_path.map(PathBuf::from)),
    })
}

/// Handles the main crawl operation
async fn handle_crawl(options: RunOptions, no_stats: bool) -> Result<()> {
    let mut coordinator = Coordinator::with_client(options.crawl.clone(), options.client.clone())
        .context("Invalid crawl configuration")?;

    println!("Starting crawl of: {}", coordinator.seed());
    println!("Max pages: {}", options.crawl.max_pages);
    println!("Delay: {}s", options.crawl.delay_seconds);
    println!();

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current page");
            signal_token.cancel();
        }
    });

    let pages = coordinator
        .crawl_with_cancellation(cancel)
        .await
        .context("Crawl failed")?;

    if pages.is_empty() {
        tracing::warn!("No pages were crawled; exports will be empty");
    }

    if !no_stats {
        print_statistics(&coordinator.statistics());
    }

    for path in export(&pages, &options)? {
        println!("Data exported to {}", path.display());
    }
    println!("\nCrawling completed successfully!");

    Ok(())
}

/// Writes the requested export files, even when `pages` is empty
///
/// Returns the paths written, JSON first.
fn export(pages: &[PageRecord], options: &RunOptions) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if options.format.includes_json() {
        let path = JsonExporter
            .export(pages, options.json_out.as_deref())
            .context("Failed to write JSON export")?;
        written.push(path);
    }

    if options.format.includes_csv() {
        let path = CsvExporter
            .export(pages, options.csv_out.as_deref())
            .context("Failed to write CSV export")?;
        written.push(path);
    }

    Ok(written)
}
