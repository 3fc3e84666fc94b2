use std::sync::Arc;

use moneyguard_client::store::{CATEGORIES_KEY, TRANSACTIONS_KEY, USER_DATA_KEY, USER_TOKEN_KEY};
use moneyguard_client::{
    ClientError, KeyValueStore, MemoryStore, MockWalletApi, RequestContext, SessionService,
    UserProfile,
};

fn remote_user() -> UserProfile {
    UserProfile {
        name: "Remote".into(),
        email: "remote@example.com".into(),
        balance: 42.0,
        avatar_url: None,
    }
}

#[tokio::test]
async fn test_register_persists_fresh_token() {
    let store = Arc::new(MemoryStore::new());
    let session = SessionService::new(Arc::new(MockWalletApi::offline()), store.clone());

    let auth = session.register("Ann", "ann@example.com").unwrap();
    assert!(auth.access_token.starts_with("dummy-auth-token-"));
    assert_eq!(auth.access_token.len(), "dummy-auth-token-".len() + 9);
    assert_eq!(auth.user.balance, 0.0);

    assert_eq!(store.get(USER_TOKEN_KEY).unwrap(), Some(auth.access_token.clone()));
    assert_eq!(session.saved_profile().unwrap(), Some(auth.user.clone()));
    assert_eq!(session.saved_context().unwrap(), auth.context());
}

#[tokio::test]
async fn test_login_uses_demo_profile() {
    let store = Arc::new(MemoryStore::new());
    let session = SessionService::new(Arc::new(MockWalletApi::offline()), store);

    let auth = session.login("me@example.com").unwrap();
    assert_eq!(auth.access_token, "dummy-auth-token-123456");
    assert_eq!(auth.user.name, "Dummy User");
    assert_eq!(auth.user.balance, 1500.75);
}

#[tokio::test]
async fn test_logout_clears_session_even_when_offline() {
    let store = Arc::new(MemoryStore::new());
    store.set(TRANSACTIONS_KEY, "[]").unwrap();
    store.set(CATEGORIES_KEY, "[]").unwrap();
    let api = Arc::new(MockWalletApi::offline());
    let session = SessionService::new(api.clone(), store.clone());

    let auth = session.login("me@example.com").unwrap();
    session.logout(&auth.context()).await.unwrap();

    assert_eq!(api.calls(), 1);
    assert!(store.get(USER_TOKEN_KEY).unwrap().is_none());
    assert!(store.get(USER_DATA_KEY).unwrap().is_none());
    assert!(store.get(TRANSACTIONS_KEY).unwrap().is_some());
    assert!(store.get(CATEGORIES_KEY).unwrap().is_some());
}

#[tokio::test]
async fn test_refresh_requires_saved_token() {
    let session = SessionService::new(Arc::new(MockWalletApi::new()), Arc::new(MemoryStore::new()));
    let err = session.refresh_user().await.unwrap_err();
    assert!(matches!(err, ClientError::TokenMissing));
    assert_eq!(err.to_string(), "Token is not exist");
}

#[tokio::test]
async fn test_refresh_prefers_remote_then_saved_profile() {
    let store = Arc::new(MemoryStore::new());
    let online = SessionService::new(
        Arc::new(MockWalletApi::new().with_user(remote_user())),
        store.clone(),
    );
    online.login("me@example.com").unwrap();
    assert_eq!(online.refresh_user().await.unwrap(), remote_user());

    let offline = SessionService::new(Arc::new(MockWalletApi::offline()), store);
    let user = offline.refresh_user().await.unwrap();
    assert_eq!(user.name, "Dummy User");
}

#[tokio::test]
async fn test_balance_fallbacks() {
    let store = Arc::new(MemoryStore::new());
    let offline = SessionService::new(Arc::new(MockWalletApi::offline()), store.clone());
    let ctx = RequestContext::with_token("tok");

    // Nothing saved: the transport error surfaces
    assert!(matches!(
        offline.total_balance(&ctx).await.unwrap_err(),
        ClientError::Api(_)
    ));

    offline.login("me@example.com").unwrap();
    assert_eq!(offline.total_balance(&ctx).await.unwrap(), 1500.75);

    let online = SessionService::new(
        Arc::new(MockWalletApi::new().with_user(remote_user())),
        store,
    );
    assert_eq!(online.total_balance(&ctx).await.unwrap(), 42.0);
}

#[tokio::test]
async fn test_edit_name_updates_saved_profile() {
    let store = Arc::new(MemoryStore::new());
    let session = SessionService::new(
        Arc::new(MockWalletApi::new().with_user(remote_user())),
        store,
    );
    let auth = session.login("me@example.com").unwrap();

    let updated = session.edit_user_name(&auth.context(), "Renamed").await.unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(session.saved_profile().unwrap().unwrap().name, "Renamed");
}

#[tokio::test]
async fn test_edit_name_offline_fails_and_keeps_profile() {
    let store = Arc::new(MemoryStore::new());
    let session = SessionService::new(Arc::new(MockWalletApi::offline()), store);
    let auth = session.login("me@example.com").unwrap();

    assert!(session.edit_user_name(&auth.context(), "Renamed").await.is_err());
    assert_eq!(session.saved_profile().unwrap().unwrap().name, "Dummy User");
}

#[tokio::test]
async fn test_edit_avatar_mirrors_url_into_saved_profile() {
    let store = Arc::new(MemoryStore::new());
    let api = Arc::new(MockWalletApi::new());
    let session = SessionService::new(api.clone(), store);

    let auth = session.login("me@example.com").unwrap();
    let url = session
        .edit_user_avatar(&auth.context(), "me.png", vec![1, 2, 3])
        .await
        .unwrap();

    assert_eq!(url, "https://avatars.example/me.png");
    assert_eq!(api.last_token().as_deref(), Some("dummy-auth-token-123456"));
    let saved = session.saved_profile().unwrap().unwrap();
    assert_eq!(saved.avatar_url.as_deref(), Some(url.as_str()));
    assert_eq!(saved.name, "Dummy User");
}

#[tokio::test]
async fn test_edit_avatar_offline_keeps_saved_profile() {
    let store = Arc::new(MemoryStore::new());
    let session = SessionService::new(Arc::new(MockWalletApi::offline()), store);

    let auth = session.login("me@example.com").unwrap();
    let err = session
        .edit_user_avatar(&auth.context(), "me.png", vec![1])
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Api(_)));
    assert_eq!(session.saved_profile().unwrap().unwrap().avatar_url, None);
}

#[tokio::test]
async fn test_register_tokens_are_distinct() {
    let session = SessionService::new(
        Arc::new(MockWalletApi::offline()),
        Arc::new(MemoryStore::new()),
    );

    let a = session.register("Ann", "ann@example.com").unwrap();
    let b = session.register("Ann", "ann@example.com").unwrap();
    let suffix = |t: &str| t.trim_start_matches("dummy-auth-token-").to_string();
    assert_ne!(suffix(&a.access_token), suffix(&b.access_token));
    assert_ne!(suffix(&a.access_token)[4..], suffix(&b.access_token)[4..]);
}
