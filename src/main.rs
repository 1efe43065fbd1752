mod cli;
mod dates;
mod filter;
mod models;
mod output;
mod pipeline;
mod scrapers;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use cli::{Cli, EXAMPLE, USAGE};
use models::ScrapeRequest;
use output::JsonFileSink;
use scrapers::SessionConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => err.exit(),
        Err(_) => {
            println!("{USAGE}");
            println!("{EXAMPLE}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🔎 Review Scout");

    match scrape(&cli).await {
        Ok(path) => {
            info!("✅ Done, reviews written to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "Scraping failed");
            eprintln!("Scraping failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn scrape(cli: &Cli) -> Result<PathBuf> {
    let request = ScrapeRequest::parse(&cli.company, &cli.start_date, &cli.end_date, &cli.source)?;

    let session = SessionConfig {
        headless: !cli.headful,
        ..SessionConfig::default()
    };
    let sink = JsonFileSink::new(&cli.output_dir);

    pipeline::run(&request, session, &sink).await
}
