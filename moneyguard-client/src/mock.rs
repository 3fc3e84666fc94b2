//! Scripted wallet API for tests and offline runs
//!
//! `MockWalletApi::offline()` fails every call the way an unreachable server
//! would, which drives every orchestrator down its local fallback path.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use moneyguard_core::Period;

use crate::api::{RemoteSummaryEntry, RequestContext, UserProfile, WalletApi};
use crate::error::ApiError;

/// Mock wallet backend with canned responses and a call counter.
#[derive(Debug, Default)]
pub struct MockWalletApi {
    /// When false every call fails with `ApiError::Unavailable`
    pub online: bool,
    pub summary: Vec<RemoteSummaryEntry>,
    pub categories: Vec<String>,
    pub user: UserProfile,
    calls: AtomicUsize,
    last_token: Mutex<Option<String>>,
}

impl MockWalletApi {
    /// A reachable server with empty data.
    pub fn new() -> Self {
        Self {
            online: true,
            ..Self::default()
        }
    }

    /// An unreachable server.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn with_summary(mut self, summary: Vec<RemoteSummaryEntry>) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_user(mut self, user: UserProfile) -> Self {
        self.user = user;
        self
    }

    /// Number of calls that reached the mock, successful or not.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Token carried by the most recent call.
    pub fn last_token(&self) -> Option<String> {
        self.last_token.lock().ok().and_then(|t| t.clone())
    }

    fn hit(&self, ctx: &RequestContext) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_token.lock() {
            *last = ctx.token().map(str::to_string);
        }
        if self.online {
            Ok(())
        } else {
            Err(ApiError::Unavailable("mock wallet is offline".to_string()))
        }
    }
}

#[async_trait]
impl WalletApi for MockWalletApi {
    async fn fetch_summary(
        &self,
        ctx: &RequestContext,
        _period: Period,
    ) -> Result<Vec<RemoteSummaryEntry>, ApiError> {
        self.hit(ctx)?;
        Ok(self.summary.clone())
    }

    async fn fetch_categories(&self, ctx: &RequestContext) -> Result<Vec<String>, ApiError> {
        self.hit(ctx)?;
        Ok(self.categories.clone())
    }

    async fn current_user(&self, ctx: &RequestContext) -> Result<UserProfile, ApiError> {
        self.hit(ctx)?;
        Ok(self.user.clone())
    }

    async fn update_user_name(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<UserProfile, ApiError> {
        self.hit(ctx)?;
        Ok(UserProfile {
            name: name.to_string(),
            ..self.user.clone()
        })
    }

    async fn update_avatar(
        &self,
        ctx: &RequestContext,
        file_name: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        self.hit(ctx)?;
        Ok(format!("https://avatars.example/{file_name}"))
    }

    async fn logout(&self, ctx: &RequestContext) -> Result<(), ApiError> {
        self.hit(ctx)
    }

    async fn send_reset_email(&self, _email: &str) -> Result<(), ApiError> {
        self.hit(&RequestContext::anonymous())
    }

    async fn change_password(&self, ctx: &RequestContext, _password: &str) -> Result<(), ApiError> {
        self.hit(ctx)
    }
}
