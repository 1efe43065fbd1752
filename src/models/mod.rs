mod request;

pub use request::{RequestError, ScrapeRequest};

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Review site a record was scraped from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Source {
    G2,
    Capterra,
    TrustRadius,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::G2, Source::Capterra, Source::TrustRadius];

    /// Lower-case key used on the command line and in output file names
    pub fn key(self) -> &'static str {
        match self {
            Source::G2 => "g2",
            Source::Capterra => "capterra",
            Source::TrustRadius => "trustradius",
        }
    }

    /// Reviews listing URL for a company
    pub fn reviews_url(self, company: &str) -> String {
        let slug = product_slug(company);
        match self {
            Source::G2 => format!("https://www.g2.com/products/{slug}/reviews"),
            Source::Capterra => format!("https://www.capterra.com/p/{slug}/reviews"),
            Source::TrustRadius => format!("https://www.trustradius.com/products/{slug}/reviews"),
        }
    }

    pub fn valid_keys() -> String {
        Self::ALL.iter().map(|s| s.key()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Source::G2 => "G2",
            Source::Capterra => "Capterra",
            Source::TrustRadius => "TrustRadius",
        };
        f.write_str(label)
    }
}

impl FromStr for Source {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|source| source.key() == wanted)
            .ok_or_else(|| RequestError::UnknownSource {
                given: s.to_string(),
                valid: Self::valid_keys(),
            })
    }
}

/// Company name lower-cased with whitespace runs turned into hyphens
pub fn product_slug(company: &str) -> String {
    company
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Star rating on a 0-5 scale
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct Rating(f64);

impl Rating {
    pub const MAX: f64 = 5.0;

    /// Rating from a count of filled star icons
    pub fn from_stars(count: usize) -> Self {
        Self((count as f64).min(Self::MAX))
    }

    /// Rating from a 0-10 score, rescaled linearly onto 0-5
    pub fn from_ten_point(score: f64) -> Self {
        Self((score * 0.5).clamp(0.0, Self::MAX))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Whole ratings are written as integers, half stars as decimals
impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 {
            serializer.serialize_u8(self.0 as u8)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

/// Review fields as read off the page, before any date parsing or filtering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawReview {
    pub title: String,
    pub reviewer: String,
    pub date: String,
    pub rating: Option<Rating>,
    pub pros: String,
    pub cons: String,
    pub problems_solved: String,
}

impl RawReview {
    pub fn has_content(&self) -> bool {
        !self.pros.is_empty() || !self.cons.is_empty()
    }
}

/// Persisted review record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub source: Source,
    pub title: String,
    pub reviewer: String,
    /// Canonical `YYYY-MM-DD`
    pub date: String,
    pub rating: Option<Rating>,
    pub pros: String,
    pub cons: String,
    pub problems_solved: String,
}
