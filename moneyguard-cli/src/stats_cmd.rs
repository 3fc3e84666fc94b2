//! `moneyguard stats`: monthly summary plus the expense breakdown, as text.

use anyhow::Result;
use moneyguard_core::{format_hryvnia, CategorySummaryEntry, ChartBreakdown, Period};
use std::fmt::Write;

use crate::app::App;

const BAR_WIDTH: usize = 30;

pub async fn run(app: &App, period: Period, json: bool) -> Result<()> {
    let ctx = app.session.saved_context()?;
    let entries = app.statistics.summary(&ctx, period).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    print!("{}", render(period, &entries)?);
    Ok(())
}

pub fn render(period: Period, entries: &[CategorySummaryEntry]) -> Result<String> {
    let chart = ChartBreakdown::from_summary(entries);
    let mut out = String::new();

    writeln!(out, "# Statistics for {period}\n")?;

    if chart.is_empty() {
        writeln!(out, "No expense data available")?;
        writeln!(out, "Add some transactions to see your spending breakdown\n")?;
        writeln!(out, "{}", format_hryvnia(chart.expense_total))?;
        return Ok(out);
    }

    let width = chart.slices.iter().map(|s| s.label.len()).max().unwrap_or(0);
    for (slice, share) in chart.slices.iter().zip(chart.shares()) {
        let filled = ((share / 100.0) * BAR_WIDTH as f64)
            .round()
            .clamp(0.0, BAR_WIDTH as f64) as usize;
        writeln!(
            out,
            "{:<width$}  {:<bar$}  {:>5.1}%  {}  {}",
            slice.label,
            "#".repeat(filled),
            share,
            format_hryvnia(slice.value),
            slice.color,
            bar = BAR_WIDTH,
        )?;
    }
    writeln!(out, "\nExpenses: {}", format_hryvnia(chart.expense_total))?;

    let income: f64 = entries
        .iter()
        .filter(|e| moneyguard_core::is_income(&e.category))
        .map(|e| e.total)
        .sum();
    if income != 0.0 {
        writeln!(out, "Income:   {}", format_hryvnia(income))?;
    }

    Ok(out)
}
