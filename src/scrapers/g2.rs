use crate::models::{RawReview, Rating};
use crate::scrapers::loader::{self, LoadOutcome};
use crate::scrapers::selectors::{compile, SelectorChain};
use crate::scrapers::traits::PageDriver;
use crate::scrapers::types::ClickLoadConfig;
use anyhow::Result;
use scraper::{ElementRef, Html, Selector};
use tracing::info;

/// G2 listing: "load more" button pagination, `data-qa` tagged fields
pub struct G2Scraper {
    loading: ClickLoadConfig,
    card: Selector,
    title: SelectorChain,
    reviewer: SelectorChain,
    date: SelectorChain,
    pros: SelectorChain,
    cons: SelectorChain,
    rating_widget: Selector,
    filled_star: Selector,
}

impl G2Scraper {
    pub fn new() -> Result<Self> {
        let loading = ClickLoadConfig::g2();
        Ok(Self {
            card: compile(loading.item_selector)?,
            loading,
            title: SelectorChain::parse(&[r#"[data-qa="review-title"]"#])?,
            reviewer: SelectorChain::parse(&[r#"[data-qa="reviewer-name"]"#])?,
            date: SelectorChain::parse(&[r#"[data-qa="review-date-posted"]"#])?,
            pros: SelectorChain::parse(&[r#"[data-qa="review-pros-text"]"#])?,
            cons: SelectorChain::parse(&[r#"[data-qa="review-cons-text"]"#])?,
            rating_widget: compile(r#"[data-qa="rating-component"]"#)?,
            filled_star: compile(".full-star-icon")?,
        })
    }

    pub fn load(&self, page: &dyn PageDriver) -> LoadOutcome {
        info!("Clicking \"Load More\" until all G2 reviews are listed...");
        loader::click_until_stable(page, &self.loading)
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
                problems_solved: String::new(),
            })
            .collect()
    }

    fn rating(&self, card: ElementRef<'_>) -> Option<Rating> {
        let widget = card.select(&self.rating_widget).next()?;
        Some(Rating::from_stars(widget.select(&self.filled_star).count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body><div class="review-list">
          <div class="review-list__item">
            <h3 data-qa="review-title">"Does the job"</h3>
            <span data-qa="reviewer-name"> Jane D. </span>
            <time data-qa="review-date-posted">January 15, 2024</time>
            <div data-qa="rating-component">
              <i class="full-star-icon"></i><i class="full-star-icon"></i>
              <i class="full-star-icon"></i><i class="full-star-icon"></i>
              <i class="empty-star-icon"></i>
            </div>
            <p data-qa="review-pros-text">Great</p>
            <p data-qa="review-cons-text"></p>
          </div>
          <div class="review-list__item">
            <span data-qa="reviewer-name">Anonymous</span>
          </div>
        </div></body></html>
    "#;

    #[test]
    fn test_extracts_cards() {
        let reviews = G2Scraper::new().unwrap().extract(LISTING);

        assert_eq!(reviews.len(), 2);
        let first = &reviews[0];
        assert_eq!(first.title, "\"Does the job\"");
        assert_eq!(first.reviewer, "Jane D.");
        assert_eq!(first.date, "January 15, 2024");
        assert_eq!(first.rating, Some(Rating::from_stars(4)));
        assert_eq!(first.pros, "Great");
        assert_eq!(first.cons, "");
        assert_eq!(first.problems_solved, "");
    }

    #[test]
    fn test_missing_rating_widget_is_unrated() {
        let reviews = G2Scraper::new().unwrap().extract(LISTING);
        assert_eq!(reviews[1].rating, None);
        assert!(!reviews[1].has_content());
    }
}
