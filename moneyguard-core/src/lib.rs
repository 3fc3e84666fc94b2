//! moneyguard-core: transaction records, monthly summaries and the expense
//! chart breakdown. Pure code, no I/O.

pub mod catalog;
pub mod chart;
pub mod finance;
pub mod summary;
pub mod time;

pub use catalog::{category_color, default_categories, is_income, DEFAULT_CATEGORIES};
pub use chart::{format_hryvnia, ChartBreakdown, ChartSlice};
pub use finance::{Amount, CategorySummaryEntry, Period, TransactionRecord, OTHER_CATEGORY};
pub use summary::SummaryAggregator;
pub use time::{DateFormat, TransactionDate};
