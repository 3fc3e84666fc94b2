//! Transaction date handling: the textual encoding is classified once when a
//! record is ingested, and the calendar date is cached next to the raw text.
//!
//! Two encodings are recognized:
//! - `DD-MM-YYYY` (day first, dash separated) → [`DateFormat::DayFirst`]
//! - anything else → [`DateFormat::Generic`], parsed against a fixed list of
//!   chrono formats (ISO `YYYY-MM-DD` first).
//!
//! A dash alone does not make a date day-first: the last of the three
//! segments must be the 4-digit year. `2024-03-15` is therefore Generic (ISO)
//! and `15-03-2024` is DayFirst; both resolve to the same calendar day.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How a raw date string was classified at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    #[serde(rename = "day-first")]
    DayFirst,
    #[serde(rename = "generic")]
    Generic,
}

const GENERIC_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const GENERIC_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

impl DateFormat {
    /// Classify a raw date string.
    pub fn detect(raw: &str) -> Self {
        let parts: Vec<&str> = raw.trim().split('-').collect();
        let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

        if parts.len() == 3
            && parts.iter().all(|p| all_digits(p))
            && parts[2].len() == 4
            && parts[0].len() <= 2
            && parts[1].len() <= 2
        {
            DateFormat::DayFirst
        } else {
            DateFormat::Generic
        }
    }

    /// Parse `raw` under this format. Calendar-invalid dates (e.g. Feb 31)
    /// yield `None`; there is no day rollover.
    pub fn parse(self, raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        match self {
            DateFormat::DayFirst => parse_day_first(raw),
            DateFormat::Generic => parse_generic(raw),
        }
    }
}

fn parse_day_first(s: &str) -> Option<NaiveDate> {
    let mut it = s.split('-');
    let d: u32 = it.next()?.parse().ok()?;
    let m: u32 = it.next()?.parse().ok()?;
    let y: i32 = it.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(y, m, d)
}

fn parse_generic(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }

    for fmt in GENERIC_DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    GENERIC_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

/// A transaction date as stored, plus its ingestion-time interpretation.
///
/// Serializes back to the raw string so cached records round-trip unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDate {
    raw: String,
    format: DateFormat,
    parsed: Option<NaiveDate>,
}

impl TransactionDate {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let format = DateFormat::detect(&raw);
        let parsed = format.parse(&raw);
        Self { raw, format, parsed }
    }

    /// Day-first text (`DD-MM-YYYY`) for a known calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            raw: date.format("%d-%m-%Y").to_string(),
            format: DateFormat::DayFirst,
            parsed: Some(date),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn format(&self) -> DateFormat {
        self.format
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.parsed
    }

    /// True if the date parsed and falls in the given calendar month.
    pub fn is_in_month(&self, month: u32, year: i32) -> bool {
        self.parsed
            .map(|d| d.month() == month && d.year() == year)
            .unwrap_or(false)
    }
}

impl Default for TransactionDate {
    fn default() -> Self {
        Self::new("")
    }
}

impl Serialize for TransactionDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for TransactionDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Non-string dates (numbers, objects, null) are kept as unparseable
        // records rather than failing the whole cache.
        Ok(match Option::<RawDate>::deserialize(deserializer)? {
            Some(RawDate::Text(s)) => TransactionDate::new(s),
            _ => TransactionDate::default(),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    #[allow(dead_code)]
    Other(serde::de::IgnoredAny),
}
