use crate::models::{RawReview, Rating};
use crate::scrapers::loader::{self, LoadOutcome};
use crate::scrapers::selectors::{compile, text_of, SelectorChain};
use crate::scrapers::traits::PageDriver;
use crate::scrapers::types::{ClickLoadConfig, ScrollConfig};
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::info;

const SETTLE_DELAY: Duration = Duration::from_secs(2);

static TEN_POINT_RATING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Rating: (\d+(?:\.\d+)?)\s*out of 10").expect("rating pattern is valid")
});

/// TrustRadius listing: button pagination with a scroll fallback, 10-point ratings
pub struct TrustRadiusScraper {
    loading: ClickLoadConfig,
    scrolling: ScrollConfig,
    card: Selector,
    title: SelectorChain,
    reviewer: SelectorChain,
    date: SelectorChain,
    pros: SelectorChain,
    cons: SelectorChain,
    problems_solved: SelectorChain,
    screen_reader_text: Selector,
}

impl TrustRadiusScraper {
    pub fn new() -> Result<Self> {
        let loading = ClickLoadConfig::trustradius();
        Ok(Self {
            card: compile(loading.item_selector)?,
            loading,
            scrolling: ScrollConfig::default(),
            title: SelectorChain::parse(&[
                r#"h4[class*="Header_heading"] a"#,
                "h3",
                "h4",
                ".review-title-text",
            ])?,
            reviewer: SelectorChain::parse(&[
                r#"div[class*="Byline_byline"] a[class*="Byline_name"]"#,
                ".reviewer-name",
                ".author",
            ])?,
            date: SelectorChain::parse(&[
                r#"div[class*="Header_date"]"#,
                "time",
                ".review-date",
                ".review-timestamp",
            ])?,
            pros: SelectorChain::parse(&[
                r#"[class*="ReviewAnswer_pros-list"] ul"#,
                r#"[class*="ReviewAnswer_pros-list"]"#,
            ])?,
            cons: SelectorChain::parse(&[
                r#"[class*="ReviewAnswer_cons-list"] ul"#,
                r#"[class*="ReviewAnswer_cons-list"]"#,
            ])?,
            problems_solved: SelectorChain::parse(&[
                r#"[id*="-text"] [class*="ReviewAnswer_longForm"] div"#,
                r#"[id*="question-"] [class*="ReviewAnswer_longForm"] div"#,
            ])?,
            screen_reader_text: compile(r#"[class*="_sr-only"]"#)?,
        })
    }

    pub fn load(&self, page: &dyn PageDriver) -> LoadOutcome {
        info!("Clicking \"Load More\" on TrustRadius...");
        let mut outcome = loader::click_while_ready(page, &self.loading);
        if outcome.steps == 0 {
            info!("No load-more control found, falling back to scrolling");
            outcome = loader::scroll_to_bottom(page, &self.scrolling);
        }
        page.pause(SETTLE_DELAY);
        outcome
    }

    pub fn extract(&self, html: &str) -> Vec<RawReview> {
        let document = Html::parse_document(html);
        document
            .select(&self.card)
            .map(|card| RawReview {
                title: self.title.text(card),
                reviewer: self.reviewer.text(card),
                date: self.date.text(card),
                rating: self.rating(card),
                pros: self.pros.text(card),
                cons: self.cons.text(card),
                problems_solved: self.problems_solved.text(card),
            })
            .collect()
    }

    fn rating(&self, card: ElementRef<'_>) -> Option<Rating> {
        let text = card.select(&self.screen_reader_text).next().map(text_of)?;
        parse_ten_point(&text)
    }
}

/// "Rating: 8 out of 10" rescaled onto five stars
fn parse_ten_point(text: &str) -> Option<Rating> {
    let captures = TEN_POINT_RATING.captures(text)?;
    let score: f64 = captures.get(1)?.as_str().parse().ok()?;
    Some(Rating::from_ten_point(score))
}
