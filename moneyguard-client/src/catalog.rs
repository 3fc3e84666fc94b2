//! Category list: remote first, fixed default catalog when offline.

use std::sync::Arc;

use moneyguard_core::default_categories;
use tracing::warn;

use crate::api::{RequestContext, WalletApi};
use crate::error::Result;
use crate::store::{get_json, set_json, KeyValueStore, CATEGORIES_KEY};

pub struct CategoryCatalog {
    api: Arc<dyn WalletApi>,
    store: Arc<dyn KeyValueStore>,
}

impl CategoryCatalog {
    pub fn new(api: Arc<dyn WalletApi>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { api, store }
    }

    /// Category names from the wallet API.
    ///
    /// On failure the ten default categories are returned and written over
    /// the `categories` cache, whatever it held before. This never fails.
    pub async fn categories(&self, ctx: &RequestContext) -> Vec<String> {
        match self.api.fetch_categories(ctx).await {
            Ok(categories) => categories,
            Err(e) => {
                warn!(error = %e, "categories unavailable, using default catalog");
                let defaults = default_categories();
                if let Err(e) = set_json(self.store.as_ref(), CATEGORIES_KEY, &defaults) {
                    warn!(error = %e, "could not cache default categories");
                }
                defaults
            }
        }
    }

    /// Whatever the `categories` key currently holds.
    pub fn cached(&self) -> Result<Option<Vec<String>>> {
        get_json(self.store.as_ref(), CATEGORIES_KEY)
    }
}
