use crate::filter::IntervalFilter;
use crate::models::{ReviewRecord, ScrapeRequest};
use crate::output::ReviewSink;
use crate::scrapers::{ChromeSession, PageDriver, SessionConfig, SiteScraper};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// Navigate, load, extract and filter reviews on an already open page
pub fn collect_reviews(page: &dyn PageDriver, request: &ScrapeRequest) -> Result<Vec<ReviewRecord>> {
    let source = request.source();
    let scraper = SiteScraper::for_source(source)?;

    let url = request.reviews_url();
    info!(%source, %url, "Navigating to reviews page");
    page.navigate(&url)?;

    let outcome = scraper.load(page);
    info!(%source, state = ?outcome.state, steps = outcome.steps, "Finished loading reviews");

    let html = page.content().context("Failed to read page content")?;
    let raw = scraper.extract(&html);
    info!(%source, count = raw.len(), "Extracted review cards");
    if raw.is_empty() {
        warn!(%source, "No review cards found on page");
    }

    let total = raw.len();
    let records = IntervalFilter::for_request(request).apply(raw);
    info!(
        %source,
        kept = records.len(),
        dropped = total - records.len(),
        "Filtered reviews to {}..={}",
        request.start(),
        request.end()
    );

    Ok(records)
}

/// Run a whole scrape: one browser session, then the sink.
///
/// The browser is closed before the sink runs, and on every error path.
/// Nothing is persisted when the scrape fails.
pub async fn run(request: &ScrapeRequest, session: SessionConfig, sink: &dyn ReviewSink) -> Result<PathBuf> {
    info!(
        company = request.company(),
        source = %request.source(),
        "Scraping reviews between {} and {}",
        request.start(),
        request.end()
    );

    let task_request = request.clone();
    let records = tokio::task::spawn_blocking(move || -> Result<Vec<ReviewRecord>> {
        let browser = ChromeSession::launch(&session)?;
        collect_reviews(&browser, &task_request)
    })
    .await
    .context("Scrape task failed to complete")??;

    sink.persist(request, &records).await
}
