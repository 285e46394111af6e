use chrono::NaiveDate;
use regex::{Captures, Regex};

re!(separators, r"[,\s]+");

re!(iso_date, r"^(\d{4})[-/](\d{1,2})[-/](\d{1,2})$");
re!(numeric_date, r"^(\d{1,2})[-/](\d{1,2})[-/](\d{2}|\d{4})$");
re!(pub(crate) day_month_name_date,
    r"(?i)(\d{1,2})\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+(\d{4})");
re!(pub(crate) month_name_day_date,
    r"(?i)(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+(\d{1,2}),?\s+(\d{4})");

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

type DateExtractor = fn(&Captures<'_>) -> Option<NaiveDate>;

/// Tried in order; the first pattern whose extractor yields a real date wins.
const DATE_PATTERNS: &[(fn() -> &'static Regex, DateExtractor)] = &[
    (iso_date, from_iso),
    (numeric_date, from_numeric),
    (day_month_name_date, from_day_month_name),
    (month_name_day_date, from_month_name_day),
];

/// Canonicalize a loosely formatted statement date.
///
/// Accepts `YYYY-M-D` (dash or slash), `D/M/YY[YY]` style numeric dates,
/// `15 Jan 2024` and `Jan 15, 2024`. Numeric dates are ambiguous: when the
/// first number is above 12 it is read as the day (`DD/MM`), otherwise the
/// US order `MM/DD` is assumed. Returns `None` for anything else, including
/// impossible calendar dates.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = separators().replace_all(raw.trim(), " ");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    DATE_PATTERNS.iter().find_map(|(pattern, extract)| {
        pattern().captures(cleaned).and_then(|caps| extract(&caps))
    })
}

fn number(caps: &Captures<'_>, idx: usize) -> Option<u32> {
    caps.get(idx)?.as_str().parse().ok()
}

fn year(caps: &Captures<'_>, idx: usize) -> Option<i32> {
    let raw = caps.get(idx)?.as_str();
    let value: i32 = raw.parse().ok()?;
    Some(if raw.len() == 2 { 2000 + value } else { value })
}

fn month_number(name: &str) -> Option<u32> {
    let prefix = name.get(..3)?.to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|idx| idx as u32 + 1)
}

fn from_iso(caps: &Captures<'_>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year(caps, 1)?, number(caps, 2)?, number(caps, 3)?)
}

fn from_numeric(caps: &Captures<'_>) -> Option<NaiveDate> {
    let first = number(caps, 1)?;
    let second = number(caps, 2)?;
    let year = year(caps, 3)?;

    // No month is above 12, so the first number must be the day.
    let (month, day) = if first > 12 { (second, first) } else { (first, second) };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn from_day_month_name(caps: &Captures<'_>) -> Option<NaiveDate> {
    let month = month_number(caps.get(2)?.as_str())?;
    NaiveDate::from_ymd_opt(year(caps, 3)?, month, number(caps, 1)?)
}

fn from_month_name_day(caps: &Captures<'_>) -> Option<NaiveDate> {
    let month = month_number(caps.get(1)?.as_str())?;
    NaiveDate::from_ymd_opt(year(caps, 3)?, month, number(caps, 2)?)
}
