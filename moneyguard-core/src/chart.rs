//! Expense breakdown for the statistics doughnut: which slices to draw, in
//! which color, and how the center total is printed.

use serde::Serialize;

use crate::catalog::{category_color, is_income};
use crate::finance::CategorySummaryEntry;

/// One drawable slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
}

/// Chart-ready view of a monthly summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBreakdown {
    pub slices: Vec<ChartSlice>,
    /// Expense total shown in the middle of the chart
    pub expense_total: f64,
}

impl ChartBreakdown {
    /// Build slices from summary entries, dropping income and unlabeled rows.
    /// Input order is kept.
    pub fn from_summary(entries: &[CategorySummaryEntry]) -> Self {
        let slices: Vec<ChartSlice> = entries
            .iter()
            .filter(|e| !e.category.is_empty() && !is_income(&e.category))
            .map(|e| ChartSlice {
                label: e.category.clone(),
                value: e.total,
                color: category_color(&e.category),
            })
            .collect();

        let expense_total = slices.iter().map(|s| s.value).sum();

        Self {
            slices,
            expense_total,
        }
    }

    /// Nothing to draw: the "no expense data" state.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty() || self.expense_total == 0.0
    }

    /// Share of the expense total for each slice, in percent.
    pub fn shares(&self) -> Vec<f64> {
        if self.expense_total == 0.0 {
            return vec![0.0; self.slices.len()];
        }
        self.slices
            .iter()
            .map(|s| s.value / self.expense_total * 100.0)
            .collect()
    }
}

/// Format an amount the uk-UA way with the hryvnia sign: `₴ 1 234,50`.
/// Groups are separated by a no-break space.
pub fn format_hryvnia(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('\u{a0}');
        }
        grouped.push(ch);
    }

    let sign = if negative && cents > 0 { "-" } else { "" };
    format!("₴ {sign}{grouped},{frac:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FALLBACK_COLOR;

    fn entry(c: &str, t: f64) -> CategorySummaryEntry {
        CategorySummaryEntry::new(c, t)
    }

    #[test]
    fn test_income_excluded() {
        let b = ChartBreakdown::from_summary(&[
            entry("Income", 5000.0),
            entry("Products", 150.5),
            entry("INCOME", 10.0),
            entry("Car", 49.5),
        ]);
        let labels: Vec<_> = b.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Products", "Car"]);
        assert_eq!(b.expense_total, 200.0);
        assert!(!b.is_empty());
    }

    #[test]
    fn test_colors() {
        let b = ChartBreakdown::from_summary(&[entry("Car", 1.0), entry("Crypto", 1.0)]);
        assert_eq!(b.slices[0].color, "#FD9498");
        assert_eq!(b.slices[1].color, FALLBACK_COLOR);
    }

    #[test]
    fn test_empty_states() {
        assert!(ChartBreakdown::from_summary(&[]).is_empty());
        assert!(ChartBreakdown::from_summary(&[entry("Income", 10.0)]).is_empty());
        assert!(ChartBreakdown::from_summary(&[entry("Car", 0.0)]).is_empty());
        assert!(ChartBreakdown::from_summary(&[entry("", 10.0)]).is_empty());
    }

    #[test]
    fn test_shares() {
        let b = ChartBreakdown::from_summary(&[entry("Car", 75.0), entry("Leisure", 25.0)]);
        assert_eq!(b.shares(), vec![75.0, 25.0]);
    }

    #[test]
    fn test_format_hryvnia() {
        assert_eq!(format_hryvnia(0.0), "₴ 0,00");
        assert_eq!(format_hryvnia(150.5), "₴ 150,50");
        assert_eq!(format_hryvnia(1234.5), "₴ 1\u{a0}234,50");
        assert_eq!(format_hryvnia(1234567.891), "₴ 1\u{a0}234\u{a0}567,89");
        assert_eq!(format_hryvnia(-20.0), "₴ -20,00");
    }
}
