//! Finance record types: cached transactions, amounts and monthly summaries

use anyhow::{bail, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::time::TransactionDate;

/// Label used when a transaction carries no category.
pub const OTHER_CATEGORY: &str = "Other";

/// An amount as it was stored: the wallet API and older caches mix JSON
/// numbers and numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Coerce to a float the lenient way: a leading numeric prefix is read
    /// (`"12.5 UAH"` → 12.5), anything non-numeric becomes 0.
    pub fn value(&self) -> f64 {
        match self {
            Amount::Number(n) if n.is_finite() => *n,
            Amount::Number(_) => 0.0,
            Amount::Text(s) => parse_float_prefix(s),
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Number(0.0)
    }
}

impl From<f64> for Amount {
    fn from(n: f64) -> Self {
        Amount::Number(n)
    }
}

impl From<&str> for Amount {
    fn from(s: &str) -> Self {
        Amount::Text(s.to_string())
    }
}

fn float_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid regex")
    })
}

fn parse_float_prefix(s: &str) -> f64 {
    float_prefix_re()
        .find(s.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// A cached income/expense transaction.
///
/// Every field is optional on the wire: a malformed record still loads and is
/// simply excluded (bad date) or zeroed (bad sum) by aggregation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default)]
    pub date: TransactionDate,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "amount_or_zero")]
    pub sum: Amount,
    /// "income" / "expense" as entered; sign handling is left to callers
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub comment: Option<String>,
}

fn amount_or_zero<'de, D>(deserializer: D) -> std::result::Result<Amount, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Amount(Amount),
        #[allow(dead_code)]
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Lenient>::deserialize(deserializer)? {
        Some(Lenient::Amount(a)) => a,
        _ => Amount::default(),
    })
}

/// Strings pass through; numbers and booleans are stringified; anything
/// else (objects, arrays, null) becomes `None`.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Text(String),
        Number(f64),
        Bool(bool),
        #[allow(dead_code)]
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Lenient>::deserialize(deserializer)? {
        Some(Lenient::Text(s)) => Some(s),
        Some(Lenient::Number(n)) => Some(n.to_string()),
        Some(Lenient::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

impl TransactionRecord {
    pub fn new(
        date: impl Into<String>,
        category: impl Into<String>,
        sum: impl Into<Amount>,
    ) -> Self {
        Self {
            date: TransactionDate::new(date),
            category: Some(category.into()),
            sum: sum.into(),
            kind: None,
            comment: None,
        }
    }

    /// Category label, with missing or empty categories folded into "Other".
    pub fn category_label(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => OTHER_CATEGORY,
        }
    }

    pub fn amount(&self) -> f64 {
        self.sum.value()
    }
}

/// Per-category total for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummaryEntry {
    pub category: String,
    pub total: f64,
}

impl CategorySummaryEntry {
    pub fn new(category: impl Into<String>, total: f64) -> Self {
        Self {
            category: category.into(),
            total,
        }
    }
}

/// A calendar month, the unit summaries are requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub month: u32,
    pub year: i32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            bail!("invalid month {month} (expected 1-12)");
        }
        Ok(Self { month, year })
    }

    /// Parse the wallet API's `M-YYYY` form.
    pub fn parse(s: &str) -> Result<Self> {
        let (m, y) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| anyhow::anyhow!("invalid period '{s}' (expected M-YYYY)"))?;
        let month: u32 = m
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid month in '{s}': {e}"))?;
        let year: i32 = y
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid year in '{s}': {e}"))?;
        Self::new(month, year)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.month, self.year)
    }
}
