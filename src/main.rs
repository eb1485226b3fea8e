//! Linkscout main entry point
//!
//! This is the command-line interface for the Linkscout targeted link
//! hunter.

use anyhow::Context;
use clap::Parser;
use linkscout::api;
use linkscout::config::{load_config, Config};
use linkscout::crawler::Controller;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Linkscout: a targeted link hunter
///
/// Linkscout crawls a single site breadth-first, hunting for pages that
/// reference a target resource, and exposes start/stop/status/results over
/// a small HTTP API.
#[derive(Parser, Debug)]
#[command(name = "linkscout")]
#[command(version = "1.0.0")]
#[command(about = "A targeted link hunter", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults apply if omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config, print effective settings, and exit
    #[arg(long)]
    dry_run: bool,

    /// Site URL for a one-shot scan instead of serving the API
    #[arg(long, requires = "target")]
    site: Option<String>,

    /// Target resource URL for a one-shot scan
    #[arg(long, requires = "site")]
    target: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let controller = Controller::new(config.clone())?;

    if let (Some(site), Some(target)) = (&cli.site, &cli.target) {
        handle_scan(&controller, site, target).await?;
    } else {
        api::serve(&config.server.bind_address, Arc::new(controller)).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkscout=info,warn"),
            1 => EnvFilter::new("linkscout=debug,info"),
            2 => EnvFilter::new("linkscout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows effective settings
fn handle_dry_run(config: &Config) {
    println!("=== Linkscout Dry Run ===\n");

    println!("Server:");
    println!("  Bind address: {}", config.server.bind_address);

    println!("\nCrawler:");
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Connect timeout: {}s", config.crawler.connect_timeout_secs);
    println!(
        "  Redirect timeout: {}s",
        config.crawler.redirect_timeout_secs
    );

    println!("\nMatcher:");
    println!("  Min stem length: {}", config.matcher.min_stem_length);
    println!(
        "  Max redirect candidates: {}",
        config.matcher.max_redirect_candidates
    );
    println!(
        "  Upload path patterns ({}):",
        config.matcher.upload_path_patterns.len()
    );
    for pattern in &config.matcher.upload_path_patterns {
        println!("    - {}", pattern);
    }
    println!(
        "  Download hint patterns ({}):",
        config.matcher.download_hint_patterns.len()
    );
    for pattern in &config.matcher.download_hint_patterns {
        println!("    - {}", pattern);
    }

    println!("\nUser Agent:");
    println!(
        "  {}/{}",
        config.user_agent.name, config.user_agent.version
    );

    println!("\n✓ Configuration is valid");
}

/// Handles a one-shot scan: runs to completion and prints matches
async fn handle_scan(controller: &Controller, site: &str, target: &str) -> anyhow::Result<()> {
    tracing::info!("One-shot scan of {} for {}", site, target);

    let records = controller.scan(site, target).await?;
    let status = controller.status();

    if records.is_empty() {
        println!(
            "No references to the target found across {} pages",
            status.pages_processed
        );
        return Ok(());
    }

    for record in &records {
        println!(
            "{}  [{}]  {}",
            record.page, record.method, record.evidence
        );
    }
    println!(
        "\n{} matching page(s) out of {} processed",
        records.len(),
        status.pages_processed
    );

    Ok(())
}
