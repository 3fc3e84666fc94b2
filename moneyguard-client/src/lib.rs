//! moneyguard-client: wallet API access, local cache, and the fallback
//! orchestration around them (statistics, categories, session).

pub mod api;
pub mod catalog;
pub mod error;
pub mod ledger;
pub mod mock;
pub mod session;
pub mod statistics;
pub mod store;

pub use api::{HttpWalletApi, RemoteSummaryEntry, RequestContext, UserProfile, WalletApi};
pub use catalog::CategoryCatalog;
pub use error::{ApiError, ClientError, Result, StoreError};
pub use ledger::TransactionLedger;
pub use mock::MockWalletApi;
pub use session::{AuthSession, SessionService};
pub use statistics::StatisticsProvider;
pub use store::{FileStore, KeyValueStore, MemoryStore};
