//! The locally cached transaction list (`transactions` key).

use std::sync::Arc;

use moneyguard_core::TransactionRecord;
use tracing::debug;

use crate::error::Result;
use crate::store::{get_json, set_json, KeyValueStore, TRANSACTIONS_KEY};

pub struct TransactionLedger {
    store: Arc<dyn KeyValueStore>,
}

impl TransactionLedger {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Cached transactions; an absent key is an empty ledger.
    pub fn load(&self) -> Result<Vec<TransactionRecord>> {
        Ok(get_json(self.store.as_ref(), TRANSACTIONS_KEY)?.unwrap_or_default())
    }

    /// Append one record and return the new ledger size.
    pub fn append(&self, record: TransactionRecord) -> Result<usize> {
        let mut all = self.load()?;
        all.push(record);
        self.replace(&all)?;
        debug!(count = all.len(), "transaction cached");
        Ok(all.len())
    }

    pub fn replace(&self, records: &[TransactionRecord]) -> Result<()> {
        set_json(self.store.as_ref(), TRANSACTIONS_KEY, records)
    }
}
