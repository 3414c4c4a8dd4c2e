use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::date::normalize_date;

/// Inclusive calendar range declared by a statement file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Containment widened by `buffer_days` on each side. Statements often
    /// carry boundary transactions posted a day or two outside the declared
    /// window, and timezone drift in upstream extraction shifts dates.
    pub fn contains_buffered(self, date: NaiveDate, buffer_days: u64) -> bool {
        let lo = self
            .start
            .checked_sub_days(Days::new(buffer_days))
            .unwrap_or(self.start);
        let hi = self
            .end
            .checked_add_days(Days::new(buffer_days))
            .unwrap_or(self.end);
        date >= lo && date <= hi
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RangeError {
    #[error("declared range is the unknown-range sentinel")]
    UnknownSentinel,
    #[error("declared range has no recognizable separator: {0}")]
    NoSeparator(String),
    #[error("declared range date failed to normalize: {0}")]
    UnparseableSide(String),
}

/// Parse declared-range text like `"01 Jan 2024 - 31 Jan 2024"` into a
/// `DateRange`. Each side goes through the full date normalizer, so the two
/// sides may use different encodings. The upstream "Unknown Date Range"
/// sentinel (with or without a diagnostic prefix) is reported as an error,
/// which the matcher treats as "range tier unavailable".
pub fn parse_declared_range(text: &str) -> Result<DateRange, RangeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.to_lowercase().contains("unknown date range") {
        return Err(RangeError::UnknownSentinel);
    }

    // Split on a spaced dash or "to" so dates like 15-Mar-2024 survive.
    let (lhs, rhs) = split_range(trimmed)
        .ok_or_else(|| RangeError::NoSeparator(trimmed.to_string()))?;

    let start =
        normalize_date(lhs).ok_or_else(|| RangeError::UnparseableSide(lhs.to_string()))?;
    let end =
        normalize_date(rhs).ok_or_else(|| RangeError::UnparseableSide(rhs.to_string()))?;

    Ok(DateRange::new(start, end))
}

fn split_range(text: &str) -> Option<(&str, &str)> {
    for sep in [" - ", " – ", " — ", " to ", " To ", " TO "] {
        if let Some((lhs, rhs)) = text.split_once(sep) {
            return Some((lhs.trim(), rhs.trim()));
        }
    }
    None
}
