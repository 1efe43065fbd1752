use crate::models::{RawReview, Rating};
use crate::scrapers::loader::{self, LoadOutcome};
use crate::scrapers::selectors::{compile, text_of, SelectorChain};
use crate::scrapers::traits::PageDriver;
use crate::scrapers::types::ScrollConfig;
use anyhow::Result;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::info;

const SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Capterra listing: lazy-loaded on scroll, answers split into headed sections
pub struct CapterraScraper {
    scrolling: ScrollConfig,
    card: Selector,
    title: SelectorChain,
    reviewer: SelectorChain,
    date: SelectorChain,
    rating_widget: Selector,
    full_star: Selector,
    section: Selector,
    section_header: Selector,
    section_body: Selector,
}

/// Answers recovered from the labeled detail sections
#[derive(Debug, Default, PartialEq)]
struct Answers {
    pros: String,
    cons: String,
    problems_solved: String,
}

impl Answers {
    /// File `body` under the answer its header names; unknown headers are ignored
    fn record(&mut self, header: &str, body: String) {
        if header == "Pros" {
            self.pros = body;
        } else if header == "Cons" {
            self.cons = body;
        } else if header.to_lowercase().contains("problems solved") {
            self.problems_solved = body;
        }
    }
}

impl CapterraScraper {
    pub fn new() -> Result<Self> {
        Ok(Self {
            scrolling: ScrollConfig::default(),
            card: compile(
                r#"div[data-test-id="review-cards-container"] > div:not([data-test-id="load-more-container"])"#,
            )?,
            title: SelectorChain::parse(&["h3.typo-20.font-semibold"])?,
            reviewer: SelectorChain::parse(&[".typo-10.text-neutral-90 span.typo-20.font-semibold"])?,
            date: SelectorChain::parse(&[".space-y-1 .typo-0.text-neutral-90"])?,
            rating_widget: compile(r#"div[data-testid="rating"]"#)?,
            full_star: compile(r#"i[role="img"][aria-label*="star-full"]"#)?,
            section: compile(".space-y-6 > .space-y-2")?,
            section_header: compile("span.font-semibold span")?,
            section_body: compile("p")?,
        })
    }

    pub fn load(&self, page: &dyn PageDriver) -> LoadOutcome {
        info!("Scrolling to load all Capterra reviews...");
        let outcome = loader::scroll_to_bottom(page, &self.scrolling);
        page.pause(SETTLE_DELAY);
        outcome
    }

    pub fn extract(&self, html: &str) -> Vec<RawReview> {
        let document = Html::parse_document(html);
        document
            .select(&self.card)
            .map(|card| {
                let answers = self.answers(card);
                RawReview {
                    title: self.title.text(card),
                    reviewer: self.reviewer.text(card),
                    date: self.date.text(card),
                    rating: self.rating(card),
                    pros: answers.pros,
                    cons: answers.cons,
                    problems_solved: answers.problems_solved,
                }
            })
            .collect()
    }

    fn rating(&self, card: ElementRef<'_>) -> Option<Rating> {
        let widget = card.select(&self.rating_widget).next()?;
        Some(Rating::from_stars(widget.select(&self.full_star).count()))
    }

    fn answers(&self, card: ElementRef<'_>) -> Answers {
        let mut answers = Answers::default();
        for section in card.select(&self.section) {
            let header = section.select(&self.section_header).next().map(text_of).unwrap_or_default();
            let body = section.select(&self.section_body).next().map(text_of).unwrap_or_default();
            answers.record(&header, body);
        }
        answers
    }
}
