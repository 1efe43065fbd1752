//! Command-line arguments for Review Scout.

use clap::Parser;
use std::path::PathBuf;

pub const USAGE: &str =
    "Usage: review-scout \"Company Name\" YYYY-MM-DD YYYY-MM-DD [g2|capterra|trustradius]";
pub const EXAMPLE: &str = "Example: review-scout \"Slack\" 2024-01-01 2024-06-30 g2";

/// Scrape dated customer reviews from G2, Capterra or TrustRadius.
///
/// Dates and source are validated by the scraper itself so that bad
/// values get the same error reporting as any other failed run.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Product or company name as it appears in the site's URL
    pub company: String,

    /// First day to include (YYYY-MM-DD)
    pub start_date: String,

    /// Last day to include (YYYY-MM-DD)
    pub end_date: String,

    /// Review site: g2, capterra or trustradius
    pub source: String,

    /// Directory the JSON file is written to
    #[arg(long, env = "REVIEW_SCOUT_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headful: bool,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}
