use crate::dates::{canonical, parse_date};
use crate::models::{RawReview, ReviewRecord, ScrapeRequest, Source};
use chrono::NaiveDate;
use tracing::debug;

/// Keeps raw reviews whose date falls inside an inclusive day range
#[derive(Debug, Clone)]
pub struct IntervalFilter {
    source: Source,
    start: NaiveDate,
    end: NaiveDate,
    require_content: bool,
}

impl IntervalFilter {
    pub fn new(source: Source, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            source,
            start,
            end,
            // G2 listings carry teaser cards with neither pros nor cons
            require_content: source == Source::G2,
        }
    }

    pub fn for_request(request: &ScrapeRequest) -> Self {
        Self::new(request.source(), request.start(), request.end())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Normalize and filter, dropping anything undated, out of range or empty
    pub fn apply(&self, raw: Vec<RawReview>) -> Vec<ReviewRecord> {
        raw.into_iter()
            .enumerate()
            .filter_map(|(idx, review)| self.keep(idx, review))
            .collect()
    }

    fn keep(&self, idx: usize, review: RawReview) -> Option<ReviewRecord> {
        let Some(date) = parse_date(&review.date) else {
            debug!(idx, date = %review.date, "Dropping review with unparseable date");
            return None;
        };
        if !self.contains(date) {
            debug!(idx, %date, "Dropping review outside requested interval");
            return None;
        }
        if self.require_content && !review.has_content() {
            debug!(idx, "Dropping review without pros or cons");
            return None;
        }

        Some(ReviewRecord {
            source: self.source,
            title: review.title,
            reviewer: review.reviewer,
            date: canonical(date),
            rating: review.rating,
            pros: review.pros,
            cons: review.cons,
            problems_solved: review.problems_solved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn january(source: Source) -> IntervalFilter {
        IntervalFilter::new(
            source,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
    }

    fn review(date: &str, pros: &str, cons: &str) -> RawReview {
        RawReview {
            title: "Title".to_string(),
            reviewer: "Reviewer".to_string(),
            date: date.to_string(),
            pros: pros.to_string(),
            cons: cons.to_string(),
            ..RawReview::default()
        }
    }

    #[test]
    fn test_keeps_in_range_and_canonicalizes_date() {
        let kept = january(Source::G2).apply(vec![review("January 15, 2024", "Great", "")]);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].source, Source::G2);
        assert_eq!(kept[0].date, "2024-01-15");
        assert_eq!(kept[0].pros, "Great");
    }

    #[test]
    fn test_interval_is_inclusive_on_both_ends() {
        let kept = january(Source::Capterra).apply(vec![
            review("December 31, 2023", "", ""),
            review("January 1, 2024", "", ""),
            review("January 31, 2024", "", ""),
            review("February 1, 2024", "", ""),
        ]);

        let dates: Vec<_> = kept.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2024-01-01", "2024-01-31"]);
    }

    #[test]
    fn test_unparseable_dates_are_dropped() {
        let kept = january(Source::TrustRadius).apply(vec![review("", "a", "b"), review("last week", "a", "b")]);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_content_rule_only_applies_to_g2() {
        let empty = || vec![review("2024-01-10", "", "")];

        assert!(january(Source::G2).apply(empty()).is_empty());
        assert_eq!(january(Source::Capterra).apply(empty()).len(), 1);
        assert_eq!(january(Source::TrustRadius).apply(empty()).len(), 1);
        assert_eq!(january(Source::G2).apply(vec![review("2024-01-10", "", "Slow")]).len(), 1);
    }
}
