//! Monthly per-category summaries computed from locally cached transactions.
//!
//! This is the offline counterpart of the wallet API's `/summary` endpoint:
//! same output shape, same `(month, year)` bucket.

use std::collections::HashMap;

use crate::finance::{CategorySummaryEntry, TransactionRecord};

/// Folds transactions into per-category totals for one month.
pub struct SummaryAggregator;

impl SummaryAggregator {
    /// Total every transaction dated in `month`/`year`, grouped by category.
    ///
    /// Entries appear in the order their category is first seen among the
    /// matching transactions. Undated or unparseable records never match; a
    /// non-numeric sum adds 0 but still opens its category's entry.
    pub fn aggregate(
        transactions: &[TransactionRecord],
        month: u32,
        year: i32,
    ) -> Vec<CategorySummaryEntry> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut entries: Vec<CategorySummaryEntry> = Vec::new();

        for txn in transactions.iter().filter(|t| t.date.is_in_month(month, year)) {
            let category = txn.category_label();
            let slot = *index.entry(category).or_insert_with(|| {
                entries.push(CategorySummaryEntry::new(category, 0.0));
                entries.len() - 1
            });
            entries[slot].total += txn.amount();
        }

        entries
    }

    /// Sum of all entry totals.
    pub fn grand_total(entries: &[CategorySummaryEntry]) -> f64 {
        entries.iter().map(|e| e.total).sum()
    }
}
