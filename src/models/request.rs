use super::Source;
use chrono::NaiveDate;
use thiserror::Error;

/// Input validation failures, raised before any browser work starts
#[derive(Error, Debug, PartialEq)]
pub enum RequestError {
    #[error("company name is required")]
    MissingCompany,
    #[error("invalid {field} '{value}', use YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
    #[error("start date {start} must not be after end date {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
    #[error("invalid source '{given}', choose from: {valid}")]
    UnknownSource { given: String, valid: String },
}

/// One validated scrape run
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeRequest {
    company: String,
    start: NaiveDate,
    end: NaiveDate,
    source: Source,
}

impl ScrapeRequest {
    /// Validate raw caller input
    pub fn parse(company: &str, start: &str, end: &str, source: &str) -> Result<Self, RequestError> {
        let company = company.trim();
        if company.is_empty() {
            return Err(RequestError::MissingCompany);
        }

        let start = parse_iso("start date", start)?;
        let end = parse_iso("end date", end)?;
        if start > end {
            return Err(RequestError::StartAfterEnd { start, end });
        }

        let source = source.parse()?;

        Ok(Self {
            company: company.to_string(),
            start,
            end,
            source,
        })
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Inclusive: a review posted any time on this day is in range
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn reviews_url(&self) -> String {
        self.source.reviews_url(&self.company)
    }
}

fn parse_iso(field: &'static str, value: &str) -> Result<NaiveDate, RequestError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| RequestError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
