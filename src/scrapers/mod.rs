pub mod browser;
pub mod capterra;
pub mod g2;
pub mod loader;
pub mod selectors;
pub mod traits;
pub mod trustradius;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use browser::ChromeSession;
pub use capterra::CapterraScraper;
pub use g2::G2Scraper;
pub use loader::LoadOutcome;
pub use traits::PageDriver;
pub use trustradius::TrustRadiusScraper;
pub use types::SessionConfig;

use crate::models::{RawReview, Source};
use anyhow::Result;

/// The load and extract strategy pair for one review site
pub enum SiteScraper {
    G2(G2Scraper),
    Capterra(CapterraScraper),
    TrustRadius(TrustRadiusScraper),
}

impl SiteScraper {
    pub fn for_source(source: Source) -> Result<Self> {
        Ok(match source {
            Source::G2 => Self::G2(G2Scraper::new()?),
            Source::Capterra => Self::Capterra(CapterraScraper::new()?),
            Source::TrustRadius => Self::TrustRadius(TrustRadiusScraper::new()?),
        })
    }

    /// Trigger additional content until the listing stops growing
    pub fn load(&self, page: &dyn PageDriver) -> LoadOutcome {
        match self {
            Self::G2(scraper) => scraper.load(page),
            Self::Capterra(scraper) => scraper.load(page),
            Self::TrustRadius(scraper) => scraper.load(page),
        }
    }

    /// Raw review fields from the fully loaded page HTML
    pub fn extract(&self, html: &str) -> Vec<RawReview> {
        match self {
            Self::G2(scraper) => scraper.extract(html),
            Self::Capterra(scraper) => scraper.extract(html),
            Self::TrustRadius(scraper) => scraper.extract(html),
        }
    }
}
