//! Wiring: one store, one wallet API, and the services built on them.

use anyhow::{Context, Result};
use moneyguard_client::{
    CategoryCatalog, FileStore, HttpWalletApi, KeyValueStore, MockWalletApi, SessionService,
    StatisticsProvider, TransactionLedger, WalletApi,
};
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;

pub struct App {
    pub session: SessionService,
    pub statistics: StatisticsProvider,
    pub catalog: CategoryCatalog,
    pub ledger: TransactionLedger,
}

impl App {
    /// Build from config. `offline` swaps the HTTP client for one that always
    /// fails, so every command runs on its local fallback.
    pub fn from_config(cfg: &Config, offline: bool) -> Result<Self> {
        let path = cfg.storage_path()?;
        debug!(path = %path.display(), offline, "opening store");
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(path));

        let api: Arc<dyn WalletApi> = if offline {
            Arc::new(MockWalletApi::offline())
        } else {
            Arc::new(
                HttpWalletApi::new(&cfg.api.base_url, cfg.timeout())
                    .context("build wallet HTTP client")?,
            )
        };

        Ok(Self::with_parts(api, store))
    }

    /// In-memory app, for tests.
    #[cfg(test)]
    pub fn in_memory(api: Arc<dyn WalletApi>) -> Self {
        Self::with_parts(api, Arc::new(moneyguard_client::MemoryStore::new()))
    }

    fn with_parts(api: Arc<dyn WalletApi>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            session: SessionService::new(api.clone(), store.clone()),
            statistics: StatisticsProvider::new(api.clone(), store.clone()),
            catalog: CategoryCatalog::new(api, store.clone()),
            ledger: TransactionLedger::new(store),
        }
    }
}
