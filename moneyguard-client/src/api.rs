//! Wallet API boundary: the trait the orchestrators depend on and its
//! reqwest implementation.

use std::time::Duration;

use async_trait::async_trait;
use moneyguard_core::{Amount, CategorySummaryEntry, Period, OTHER_CATEGORY};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://wallet.b.goit.study/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Per-call request context. The bearer token travels with each request
/// instead of living in shared client state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    token: Option<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// The token, if one is set and non-empty.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

/// The user profile the wallet API returns and the session caches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(rename = "avatarURL", default)]
    pub avatar_url: Option<String>,
}

/// A summary row as the server sends it. Totals may arrive as numbers or
/// strings and the category may be absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteSummaryEntry {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub total: Option<Amount>,
}

impl From<RemoteSummaryEntry> for CategorySummaryEntry {
    fn from(e: RemoteSummaryEntry) -> Self {
        let category = match e.category {
            Some(c) if !c.is_empty() => c,
            _ => OTHER_CATEGORY.to_string(),
        };
        let total = e.total.map(|t| t.value()).unwrap_or(0.0);
        CategorySummaryEntry::new(category, total)
    }
}

/// Every wallet response wraps its payload in `{ "data": ... }`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[async_trait]
pub trait WalletApi: Send + Sync {
    /// `GET /summary?date={month}-{year}`
    async fn fetch_summary(
        &self,
        ctx: &RequestContext,
        period: Period,
    ) -> Result<Vec<RemoteSummaryEntry>, ApiError>;

    /// `GET /categories`
    async fn fetch_categories(&self, ctx: &RequestContext) -> Result<Vec<String>, ApiError>;

    /// `GET /users/current`
    async fn current_user(&self, ctx: &RequestContext) -> Result<UserProfile, ApiError>;

    /// `PATCH /users/current`
    async fn update_user_name(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<UserProfile, ApiError>;

    /// `PATCH /users/current/avatar` (multipart `avatar` field); returns
    /// the new avatar URL.
    async fn update_avatar(
        &self,
        ctx: &RequestContext,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError>;

    /// `POST /auth/logout`
    async fn logout(&self, ctx: &RequestContext) -> Result<(), ApiError>;

    /// `POST /auth/send-reset-email`
    async fn send_reset_email(&self, email: &str) -> Result<(), ApiError>;

    /// `POST /auth/reset-pwd`
    async fn change_password(&self, ctx: &RequestContext, password: &str) -> Result<(), ApiError>;
}

/// reqwest-backed [`WalletApi`].
#[derive(Debug, Clone)]
pub struct HttpWalletApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpWalletApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn headers(ctx: &RequestContext) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = ctx.token() {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
        }
        Ok(headers)
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, "wallet GET");
        let resp = self
            .client
            .get(&url)
            .headers(Self::headers(ctx)?)
            .query(query)
            .send()
            .await?;
        let out: Envelope<T> = Self::check(resp).await?.json().await?;
        Ok(out.data)
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        ctx: &RequestContext,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.url(path);
        debug!(%url, "wallet POST");
        let resp = self
            .client
            .post(&url)
            .headers(Self::headers(ctx)?)
            .json(body)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }
}

#[async_trait]
impl WalletApi for HttpWalletApi {
    async fn fetch_summary(
        &self,
        ctx: &RequestContext,
        period: Period,
    ) -> Result<Vec<RemoteSummaryEntry>, ApiError> {
        self.get_data(ctx, "summary", &[("date", period.to_string())])
            .await
    }

    async fn fetch_categories(&self, ctx: &RequestContext) -> Result<Vec<String>, ApiError> {
        self.get_data(ctx, "categories", &[]).await
    }

    async fn current_user(&self, ctx: &RequestContext) -> Result<UserProfile, ApiError> {
        self.get_data(ctx, "users/current", &[]).await
    }

    async fn update_user_name(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<UserProfile, ApiError> {
        #[derive(Serialize)]
        struct Req<'a> {
            name: &'a str,
        }

        let url = self.url("users/current");
        debug!(%url, "wallet PATCH");
        let resp = self
            .client
            .patch(&url)
            .headers(Self::headers(ctx)?)
            .json(&Req { name })
            .send()
            .await?;
        let out: Envelope<UserProfile> = Self::check(resp).await?.json().await?;
        Ok(out.data)
    }

    async fn update_avatar(
        &self,
        ctx: &RequestContext,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        #[derive(Deserialize)]
        struct AvatarResp {
            avatar: String,
        }

        let form = Form::new().part("avatar", Part::bytes(bytes).file_name(file_name.to_string()));
        let url = self.url("users/current/avatar");
        debug!(%url, "wallet PATCH (multipart)");
        let resp = self
            .client
            .patch(&url)
            .headers(Self::headers(ctx)?)
            .multipart(form)
            .send()
            .await?;
        let out: Envelope<AvatarResp> = Self::check(resp).await?.json().await?;
        Ok(out.data.avatar)
    }

    async fn logout(&self, ctx: &RequestContext) -> Result<(), ApiError> {
        self.post_json(ctx, "auth/logout", &serde_json::json!({})).await
    }

    async fn send_reset_email(&self, email: &str) -> Result<(), ApiError> {
        self.post_json(
            &RequestContext::anonymous(),
            "auth/send-reset-email",
            &serde_json::json!({ "email": email }),
        )
        .await
    }

    async fn change_password(&self, ctx: &RequestContext, password: &str) -> Result<(), ApiError> {
        self.post_json(ctx, "auth/reset-pwd", &serde_json::json!({ "password": password }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_token() {
        assert_eq!(RequestContext::anonymous().token(), None);
        assert_eq!(RequestContext::with_token("").token(), None);
        assert_eq!(RequestContext::with_token("abc").token(), Some("abc"));
    }

    #[test]
    fn test_bearer_header() {
        let h = HttpWalletApi::headers(&RequestContext::with_token("abc")).unwrap();
        assert_eq!(h.get(AUTHORIZATION).unwrap(), "Bearer abc");
        assert!(HttpWalletApi::headers(&RequestContext::anonymous())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_url_joining() {
        let api = HttpWalletApi::new("https://wallet.example/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.url("/summary"), "https://wallet.example/summary");
        assert_eq!(api.url("users/current"), "https://wallet.example/users/current");
    }

    #[test]
    fn test_remote_summary_conversion() {
        let json = r#"{"data": [
            {"category": "Products", "total": 150.5},
            {"category": "Car", "total": "49.50"},
            {"total": 10},
            {"category": "Leisure"}
        ]}"#;
        let env: Envelope<Vec<RemoteSummaryEntry>> = serde_json::from_str(json).unwrap();
        let entries: Vec<CategorySummaryEntry> = env.data.into_iter().map(Into::into).collect();
        assert_eq!(
            entries,
            vec![
                CategorySummaryEntry::new("Products", 150.5),
                CategorySummaryEntry::new("Car", 49.5),
                CategorySummaryEntry::new(OTHER_CATEGORY, 10.0),
                CategorySummaryEntry::new("Leisure", 0.0),
            ]
        );
    }

    #[test]
    fn test_user_profile_wire_names() {
        let p: UserProfile = serde_json::from_str(
            r#"{"name":"Dummy User","email":"a@b.c","balance":1500.75,"avatarURL":null}"#,
        )
        .unwrap();
        assert_eq!(p.balance, 1500.75);
        let v = serde_json::to_value(&p).unwrap();
        assert!(v.get("avatarURL").is_some());
    }
}
