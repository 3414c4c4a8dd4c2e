use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// Diagnostic noise the extraction pipeline is known to prepend to date fields.
re!(re_noise_prefix,
    r"(?i)^\s*(?:error\b[:\s-]*)?(?:unknown date range)?[\s:,;–-]*");

re!(re_day_first_slash,
    r"^(\d{1,2})/(\d{1,2})/(\d{4})$");
re!(re_iso,
    r"^(\d{4})-(\d{2})-(\d{2})$");
re!(re_named_month,
    r"(?i)^([a-z]{3,9})\.?\s+(\d{1,2}),?\s+(\d{4})$");
re!(re_day_space_month,
    r"(?i)^(\d{1,2})\s+([a-z]{3,9})\.?,?\s+(\d{4})$");
re!(re_day_dash_month,
    r"(?i)^(\d{1,2})-([a-z]{3,9})\.?-(\d{4})$");

// ── Public API ───────────────────────────────────────────────────────────────

/// Parse a raw date string from any of the encodings the ingestion pipeline
/// emits into a canonical calendar date.
///
/// Total function: anything unrecognized comes back as `None`, which the
/// rest of the engine treats as "rank last / bucket as unknown". Patterns
/// are tried in a fixed order so mixed inputs normalize deterministically.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let s = strip_noise(raw);
    if s.is_empty() {
        return None;
    }

    try_timestamp(s)
        .or_else(|| try_day_first_slash(s))
        .or_else(|| try_iso(s))
        .or_else(|| try_named_month(s))
        .or_else(|| try_day_space_month(s))
        .or_else(|| try_day_dash_month(s))
        .filter(|date| *date != epoch_sentinel())
}

/// The instant upstream fallbacks emit for "no date". Rejected in every
/// tier, not just timestamps, so `"1970-01-01"` never passes as a real date.
fn epoch_sentinel() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid date")
}

/// Short display form used for group labels, e.g. "15 Mar 2024".
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

fn strip_noise(raw: &str) -> &str {
    let trimmed = raw.trim();
    match re_noise_prefix().find(trimmed) {
        Some(m) => trimmed[m.end()..].trim(),
        None => trimmed,
    }
}

// ── Pattern ladder ───────────────────────────────────────────────────────────

/// Already well-formed timestamps (RFC 3339 or a bare datetime). Epoch-era
/// values are rejected: upstream fallbacks encode "no date" as 1970.
fn try_timestamp(s: &str) -> Option<NaiveDate> {
    let date = chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .or_else(|_| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date())
        })
        .or_else(|_| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date())
        })
        .ok()?;
    (date.year() > 1970).then_some(date)
}

fn try_day_first_slash(s: &str) -> Option<NaiveDate> {
    let c = re_day_first_slash().captures(s)?;
    let day: u32 = c.get(1)?.as_str().parse().ok()?;
    let month: u32 = c.get(2)?.as_str().parse().ok()?;
    let year: i32 = c.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn try_iso(s: &str) -> Option<NaiveDate> {
    let c = re_iso().captures(s)?;
    let year: i32 = c.get(1)?.as_str().parse().ok()?;
    let month: u32 = c.get(2)?.as_str().parse().ok()?;
    let day: u32 = c.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn try_named_month(s: &str) -> Option<NaiveDate> {
    let c = re_named_month().captures(s)?;
    let month = month_to_num(c.get(1)?.as_str())?;
    let day: u32 = c.get(2)?.as_str().parse().ok()?;
    let year: i32 = c.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn try_day_space_month(s: &str) -> Option<NaiveDate> {
    let c = re_day_space_month().captures(s)?;
    let day: u32 = c.get(1)?.as_str().parse().ok()?;
    let month = month_to_num(c.get(2)?.as_str())?;
    let year: i32 = c.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn try_day_dash_month(s: &str) -> Option<NaiveDate> {
    let c = re_day_dash_month().captures(s)?;
    let day: u32 = c.get(1)?.as_str().parse().ok()?;
    let month = month_to_num(c.get(2)?.as_str())?;
    let year: i32 = c.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_to_num(name: &str) -> Option<u32> {
    match name.to_lowercase().as_str() {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
