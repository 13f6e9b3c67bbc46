//! Session service against an in-process backend

mod common;

use common::{FakeTransport, client};
use reqwest::Method;
use searchdish_api_client::models::Role;
use searchdish_api_client::storage::{
    ACCESS_TOKEN_KEY, MemoryTokenStore, REFRESH_TOKEN_KEY, TokenStore, USER_ID_KEY,
};
use searchdish_api_client::transport::RawResponse;
use searchdish_api_client::{SessionError, SessionEvent, SessionService};
use serde_json::json;
use std::sync::Arc;

fn logged_in_store() -> Arc<MemoryTokenStore> {
    Arc::new(MemoryTokenStore::with_entries([
        (ACCESS_TOKEN_KEY, "T"),
        (REFRESH_TOKEN_KEY, "R"),
        (USER_ID_KEY, "1"),
    ]))
}

#[tokio::test]
async fn restore_with_valid_token_publishes_user_before_ready() {
    let transport = FakeTransport::new();
    transport.json(
        Method::GET,
        "auth/me",
        200,
        json!({"id": "1", "email": "awa@searchdish.sn", "role": "RESTAURATEUR"}),
    );
    let store = logged_in_store();
    let session = SessionService::new(client(&transport, &store));
    assert!(session.current().loading);

    let mut events = session.events();
    let user = session.restore().await.unwrap().unwrap();

    assert_eq!(user.role, Role::Restaurateur);
    assert_eq!(events.try_recv().unwrap(), SessionEvent::Restored(user.clone()));
    assert_eq!(events.try_recv().unwrap(), SessionEvent::Ready);
    assert!(events.try_recv().is_err());

    let state = session.current();
    assert!(state.is_authenticated);
    assert!(!state.loading);
    assert_eq!(state.user, Some(user));

    let me = transport.requests_to(&Method::GET, "auth/me");
    assert_eq!(me.len(), 1);
    assert_eq!(me[0].bearer.as_deref(), Some("T"));
}

#[tokio::test]
async fn restore_with_rejected_token_clears_storage() {
    let transport = FakeTransport::new();
    transport.json(Method::GET, "auth/me", 401, json!({"message": "Unauthorized"}));
    let store = logged_in_store();
    let session = SessionService::new(client(&transport, &store));
    let mut events = session.events();

    assert_eq!(session.restore().await.unwrap(), None);

    for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_ID_KEY] {
        assert_eq!(store.get(key).unwrap(), None, "{key} should be cleared");
    }
    let state = session.current();
    assert_eq!(state.user, None);
    assert!(!state.is_authenticated);
    assert!(!state.loading);
    assert_eq!(events.try_recv().unwrap(), SessionEvent::Expired);
}

#[tokio::test]
async fn restore_with_server_error_keeps_storage() {
    let transport = FakeTransport::new();
    transport.on(Method::GET, "auth/me", |_| RawResponse::new(503, "Service Unavailable"));
    let store = logged_in_store();
    let session = SessionService::new(client(&transport, &store));

    let err = session.restore().await.unwrap_err();

    assert!(matches!(err, SessionError::Api(ref e) if e.status() == Some(503)));
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("T"));
    let state = session.current();
    assert!(!state.is_authenticated);
    assert!(!state.loading);
}

#[tokio::test]
async fn restore_without_token_skips_the_network() {
    let transport = FakeTransport::new();
    let store = Arc::new(MemoryTokenStore::new());
    let session = SessionService::new(client(&transport, &store));
    let watcher = session.subscribe();

    assert_eq!(session.restore().await.unwrap(), None);

    assert!(transport.requests().is_empty());
    assert!(!watcher.borrow().loading);
    assert!(!watcher.borrow().is_authenticated);
}

#[tokio::test]
async fn restore_with_empty_token_skips_the_network() {
    let transport = FakeTransport::new();
    let store = Arc::new(MemoryTokenStore::with_entries([(ACCESS_TOKEN_KEY, "")]));
    let session = SessionService::new(client(&transport, &store));
    let watcher = session.subscribe();

    assert_eq!(session.restore().await.unwrap(), None);

    assert!(transport.requests().is_empty());
    assert!(!watcher.borrow().loading);
    assert!(!watcher.borrow().is_authenticated);
}

#[tokio::test]
async fn login_stores_token_and_user_id() {
    let transport = FakeTransport::new();
    transport.json(
        Method::POST,
        "auth/login",
        200,
        json!({"user": {"id": "1", "role": "ADMIN"}, "token": {"access_token": "T"}}),
    );
    let store = Arc::new(MemoryTokenStore::new());
    let session = SessionService::new(client(&transport, &store));

    let user = session.login("a@b.com", "secret").await.unwrap();

    assert_eq!(user.id, "1");
    assert_eq!(user.role, Role::Admin);
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("T"));
    assert_eq!(store.get(USER_ID_KEY).unwrap().as_deref(), Some("1"));
    assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap(), None);
    assert!(session.current().is_authenticated);

    let sent = transport.requests_to(&Method::POST, "auth/login");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].bearer, None);
    assert_eq!(
        sent[0].body,
        searchdish_api_client::transport::RequestBody::Json(
            json!({"email": "a@b.com", "password": "secret"})
        )
    );
}

#[tokio::test]
async fn login_keeps_refresh_token_when_issued() {
    let transport = FakeTransport::new();
    transport.json(
        Method::POST,
        "auth/login",
        201,
        json!({"user": {"id": "7"}, "token": {"access_token": "A", "refresh_token": "R"}}),
    );
    let store = Arc::new(MemoryTokenStore::new());
    let session = SessionService::new(client(&transport, &store));

    session.login("awa@searchdish.sn", "secret").await.unwrap();

    assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("R"));
}

#[tokio::test]
async fn login_failure_carries_server_message() {
    let transport = FakeTransport::new();
    transport.json(
        Method::POST,
        "auth/login",
        401,
        json!({"message": "Email ou mot de passe incorrect"}),
    );
    let store = Arc::new(MemoryTokenStore::new());
    let session = SessionService::new(client(&transport, &store));

    let err = session.login("awa@searchdish.sn", "wrong!").await.unwrap_err();

    assert_eq!(err.to_string(), "Email ou mot de passe incorrect");
    assert!(store.is_empty());
    assert!(!session.current().is_authenticated);
}

#[tokio::test]
async fn login_failure_without_message_is_generic() {
    let transport = FakeTransport::new();
    transport.on(Method::POST, "auth/login", |_| RawResponse::new(500, ""));
    let store = Arc::new(MemoryTokenStore::new());
    let session = SessionService::new(client(&transport, &store));

    let err = session.login("awa@searchdish.sn", "secret").await.unwrap_err();

    assert!(matches!(err, SessionError::LoginFailed(ref m) if m == "Login failed"));
}

#[tokio::test]
async fn login_failure_ignores_body_without_message() {
    let transport = FakeTransport::new();
    transport.json(Method::POST, "auth/login", 401, json!({"statusCode": 401}));
    let store = Arc::new(MemoryTokenStore::new());
    let session = SessionService::new(client(&transport, &store));

    let err = session.login("awa@searchdish.sn", "wrong!").await.unwrap_err();

    assert_eq!(err.to_string(), "Login failed");
}

#[tokio::test]
async fn login_failure_ignores_html_error_page() {
    let transport = FakeTransport::new();
    transport.on(Method::POST, "auth/login", |_| {
        RawResponse::new(502, "<html><body>Bad Gateway</body></html>")
    });
    let store = Arc::new(MemoryTokenStore::new());
    let session = SessionService::new(client(&transport, &store));

    let err = session.login("awa@searchdish.sn", "secret").await.unwrap_err();

    assert!(matches!(err, SessionError::LoginFailed(ref m) if m == "Login failed"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn logout_clears_everything_without_a_request() {
    let transport = FakeTransport::new();
    transport.json(Method::GET, "auth/me", 200, json!({"id": "1", "role": "CUSTOMER"}));
    let store = logged_in_store();
    let session = SessionService::new(client(&transport, &store));
    session.restore().await.unwrap();
    transport.clear_requests();

    session.logout().unwrap();

    assert!(transport.requests().is_empty());
    assert!(store.is_empty());
    assert!(matches!(
        session.require_user(),
        Err(SessionError::NotAuthenticated)
    ));
}

#[tokio::test]
async fn require_role_checks_the_user() {
    let transport = FakeTransport::new();
    transport.json(Method::GET, "auth/me", 200, json!({"id": "1", "role": "CUSTOMER"}));
    let store = logged_in_store();
    let session = SessionService::new(client(&transport, &store));
    session.restore().await.unwrap();

    assert!(session.require_role(Role::Customer).is_ok());
    assert!(matches!(
        session.require_role(Role::Admin),
        Err(SessionError::Forbidden { required: Role::Admin })
    ));
}

#[tokio::test]
async fn results_after_shutdown_are_dropped() {
    let transport = FakeTransport::new();
    transport.json(
        Method::POST,
        "auth/login",
        200,
        json!({"user": {"id": "1", "role": "ADMIN"}, "token": {"access_token": "T"}}),
    );
    transport.json(Method::GET, "auth/me", 200, json!({"id": "1"}));
    let store = Arc::new(MemoryTokenStore::new());
    let session = SessionService::new(client(&transport, &store));
    session.shutdown();

    session.login("awa@searchdish.sn", "secret").await.unwrap();

    assert!(store.is_empty());
    let state = session.current();
    assert!(state.loading);
    assert!(!state.is_authenticated);
}
