//! Session operations: register, login, logout, profile refresh and balance.
//!
//! Tokens are fabricated locally; there is no real auth handshake. The token
//! and the user profile live in the store under `userToken` / `userData`,
//! and callers carry the token per request through [`RequestContext`].

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::{RequestContext, UserProfile, WalletApi};
use crate::error::{ClientError, Result};
use crate::store::{get_json, set_json, KeyValueStore, USER_DATA_KEY, USER_TOKEN_KEY};

const TOKEN_PREFIX: &str = "dummy-auth-token-";
const LOGIN_TOKEN: &str = "dummy-auth-token-123456";
const LOGIN_NAME: &str = "Dummy User";
const LOGIN_BALANCE: f64 = 1500.75;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: UserProfile,
    pub access_token: String,
}

impl AuthSession {
    pub fn context(&self) -> RequestContext {
        RequestContext::with_token(&self.access_token)
    }
}

pub struct SessionService {
    api: Arc<dyn WalletApi>,
    store: Arc<dyn KeyValueStore>,
}

impl SessionService {
    pub fn new(api: Arc<dyn WalletApi>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { api, store }
    }

    /// Create a local account with a fresh token and zero balance.
    pub fn register(&self, name: &str, email: &str) -> Result<AuthSession> {
        let session = AuthSession {
            user: UserProfile {
                name: name.to_string(),
                email: email.to_string(),
                balance: 0.0,
                avatar_url: None,
            },
            access_token: format!("{TOKEN_PREFIX}{}", random_suffix()),
        };
        self.persist(&session)?;
        info!(email, "registered");
        Ok(session)
    }

    /// Sign in as the demo user.
    pub fn login(&self, email: &str) -> Result<AuthSession> {
        let session = AuthSession {
            user: UserProfile {
                name: LOGIN_NAME.to_string(),
                email: email.to_string(),
                balance: LOGIN_BALANCE,
                avatar_url: None,
            },
            access_token: LOGIN_TOKEN.to_string(),
        };
        self.persist(&session)?;
        info!(email, "logged in");
        Ok(session)
    }

    /// Tell the server (best effort), then drop the token and profile.
    /// Cached transactions and categories are kept.
    pub async fn logout(&self, ctx: &RequestContext) -> Result<()> {
        if let Err(e) = self.api.logout(ctx).await {
            warn!(error = %e, "remote logout failed, continuing with local logout");
        }

        let token = self.store.remove(USER_TOKEN_KEY);
        let profile = self.store.remove(USER_DATA_KEY);
        token?;
        profile?;

        info!("logged out");
        Ok(())
    }

    /// Request context built from the saved token (anonymous if none).
    pub fn saved_context(&self) -> Result<RequestContext> {
        Ok(match self.store.get(USER_TOKEN_KEY)? {
            Some(token) => RequestContext::with_token(token),
            None => RequestContext::anonymous(),
        })
    }

    /// Profile saved at login, if any.
    pub fn saved_profile(&self) -> Result<Option<UserProfile>> {
        get_json(self.store.as_ref(), USER_DATA_KEY)
    }

    /// Reload the current user. Needs a saved token; falls back to the saved
    /// profile when the server is unreachable.
    pub async fn refresh_user(&self) -> Result<UserProfile> {
        let ctx = self.saved_context()?;
        if ctx.token().is_none() {
            return Err(ClientError::TokenMissing);
        }

        match self.api.current_user(&ctx).await {
            Ok(user) => Ok(user),
            Err(e) => match self.saved_profile()? {
                Some(user) => {
                    warn!(error = %e, "profile refresh failed, using saved profile");
                    Ok(user)
                }
                None => Err(e.into()),
            },
        }
    }

    /// Rename the user remotely, then mirror the change into the saved
    /// profile.
    pub async fn edit_user_name(&self, ctx: &RequestContext, name: &str) -> Result<UserProfile> {
        let updated = self.api.update_user_name(ctx, name).await?;

        if let Some(mut saved) = self.saved_profile()? {
            saved.name = name.to_string();
            set_json(self.store.as_ref(), USER_DATA_KEY, &saved)?;
        }
        Ok(updated)
    }

    /// Upload a new avatar, then store its URL in the saved profile.
    pub async fn edit_user_avatar(
        &self,
        ctx: &RequestContext,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let avatar_url = self.api.update_avatar(ctx, file_name, bytes).await?;

        if let Some(mut saved) = self.saved_profile()? {
            saved.avatar_url = Some(avatar_url.clone());
            set_json(self.store.as_ref(), USER_DATA_KEY, &saved)?;
        }
        info!(%avatar_url, "avatar updated");
        Ok(avatar_url)
    }

    /// Current balance: remote first, then the saved profile.
    pub async fn total_balance(&self, ctx: &RequestContext) -> Result<f64> {
        match self.api.current_user(ctx).await {
            Ok(user) => Ok(user.balance),
            Err(e) => match self.saved_profile()? {
                Some(user) => {
                    warn!(error = %e, "balance unavailable, using saved profile");
                    Ok(user.balance)
                }
                None => Err(e.into()),
            },
        }
    }

    pub async fn send_reset_email(&self, email: &str) -> Result<()> {
        self.api.send_reset_email(email).await?;
        info!(email, "reset email sent");
        Ok(())
    }

    pub async fn change_password(&self, ctx: &RequestContext, password: &str) -> Result<()> {
        self.api.change_password(ctx, password).await?;
        info!("password changed");
        Ok(())
    }

    fn persist(&self, session: &AuthSession) -> Result<()> {
        self.store.set(USER_TOKEN_KEY, &session.access_token)?;
        set_json(self.store.as_ref(), USER_DATA_KEY, &session.user)
    }
}

/// Nine random base-36 characters.
fn random_suffix() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut rng = rand::thread_rng();
    (0..9)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_suffix_shape() {
        let s = random_suffix();
        assert_eq!(s.len(), 9);
        assert!(s.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_random_suffixes_differ() {
        let suffixes: std::collections::HashSet<String> =
            (0..50).map(|_| random_suffix()).collect();
        assert_eq!(suffixes.len(), 50);
    }
}
