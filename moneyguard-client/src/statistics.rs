//! Monthly statistics: remote summary first, local aggregation as fallback.

use std::sync::Arc;

use moneyguard_core::{
    CategorySummaryEntry, ChartBreakdown, Period, SummaryAggregator, TransactionRecord,
};
use tracing::{debug, warn};

use crate::api::{RequestContext, WalletApi};
use crate::error::{ClientError, Result};
use crate::store::{get_json, KeyValueStore, TRANSACTIONS_KEY};

pub struct StatisticsProvider {
    api: Arc<dyn WalletApi>,
    store: Arc<dyn KeyValueStore>,
}

impl StatisticsProvider {
    pub fn new(api: Arc<dyn WalletApi>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { api, store }
    }

    /// Per-category totals for `period`.
    ///
    /// Requires a token; without one nothing is sent and `NoToken` is
    /// returned. Remote rows are normalized into [`CategorySummaryEntry`] so
    /// both paths yield the same shape. When the remote call fails the cached
    /// transactions are aggregated instead; no cache means an empty summary.
    pub async fn summary(
        &self,
        ctx: &RequestContext,
        period: Period,
    ) -> Result<Vec<CategorySummaryEntry>> {
        if ctx.token().is_none() {
            return Err(ClientError::NoToken);
        }

        debug!(%period, "fetching remote summary");
        match self.api.fetch_summary(ctx, period).await {
            Ok(rows) => Ok(rows.into_iter().map(CategorySummaryEntry::from).collect()),
            Err(e) => {
                warn!(error = %e, %period, "summary unavailable, aggregating cached transactions");
                self.local_summary(period)
            }
        }
    }

    /// Summary computed from the `transactions` cache only.
    pub fn local_summary(&self, period: Period) -> Result<Vec<CategorySummaryEntry>> {
        let cached: Option<Vec<TransactionRecord>> =
            get_json(self.store.as_ref(), TRANSACTIONS_KEY)?;

        Ok(match cached {
            Some(txns) => SummaryAggregator::aggregate(&txns, period.month, period.year),
            None => Vec::new(),
        })
    }

    /// Summary rendered as chart slices (income dropped, colors assigned).
    pub async fn expense_breakdown(
        &self,
        ctx: &RequestContext,
        period: Period,
    ) -> Result<ChartBreakdown> {
        let entries = self.summary(ctx, period).await?;
        Ok(ChartBreakdown::from_summary(&entries))
    }
}
