//! Normalization of the free-text review dates the sites print.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static NOISE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)reviewed on|posted on|verified review|\||reviewed").expect("noise pattern is valid")
});

#[derive(Debug, Clone, Copy)]
enum Layout {
    /// Day, month and year all present
    Full { four_digit_year: bool },
    /// No day component, the first of the month is assumed
    MonthYear,
}

/// Tried in order, first match wins
const FORMATS: &[(&str, Layout)] = &[
    ("%B %d, %Y", Layout::Full { four_digit_year: true }),
    ("%b %d, %Y", Layout::Full { four_digit_year: true }),
    ("%Y-%m-%d", Layout::Full { four_digit_year: true }),
    ("%m/%d/%Y", Layout::Full { four_digit_year: true }),
    ("%d/%m/%Y", Layout::Full { four_digit_year: true }),
    ("%B %Y", Layout::MonthYear),
    ("%b %Y", Layout::MonthYear),
    ("%m/%d/%y", Layout::Full { four_digit_year: false }),
    ("%m/%d/%Y", Layout::Full { four_digit_year: true }),
];

/// Parse a loosely formatted review date.
///
/// Returns `None` when the cleaned text is empty or no known format
/// matches; callers drop such records.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let cleaned = clean(text);
    if cleaned.is_empty() {
        return None;
    }

    FORMATS
        .iter()
        .find_map(|(format, layout)| parse_with(&cleaned, format, *layout))
}

/// Canonical `YYYY-MM-DD` form
pub fn canonical(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn clean(text: &str) -> String {
    let stripped = NOISE.replace_all(text, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_with(text: &str, format: &str, layout: Layout) -> Option<NaiveDate> {
    match layout {
        Layout::Full { four_digit_year } => {
            let date = NaiveDate::parse_from_str(text, format).ok()?;
            // "%Y" happily reads "24" as year 24
            if four_digit_year && date.year() < 1000 {
                return None;
            }
            Some(date)
        }
        Layout::MonthYear => {
            let date = NaiveDate::parse_from_str(&format!("{text} 1"), &format!("{format} %d")).ok()?;
            (date.year() >= 1000).then_some(date)
        }
    }
}
