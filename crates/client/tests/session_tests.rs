//! Integration tests for the auth session state machine

use aeris_client::api::auth::{ProfileUpdate, RegisterRequest};
use aeris_client::session::AuthSession;
use aeris_client::ApiClient;
use aeris_core::token::{MemoryTokenStore, TokenKind, TokenStore};
use aeris_core::AlertThreshold;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json() -> serde_json::Value {
    json!({
        "id": "7f9c0c5e-8a43-4a28-9e19-2d9a9c1f1a77",
        "email": "ada@example.com",
        "phone": "+33600000000",
        "is_admin": false,
        "pollution_threshold": 50,
        "receive_alerts": true,
        "date_joined": "2025-07-08T16:08:41.245405Z"
    })
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn session_with_store(mock_server: &MockServer) -> (AuthSession, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::new());
    let client = ApiClient::builder()
        .base_url(mock_server.uri())
        .token_store(store.clone())
        .build()
        .unwrap();
    (AuthSession::new(client), store)
}

async fn mount_login(mock_server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/users/login/"))
        .and(body_json(json!({"email": "ada@example.com", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": user_json(),
            "access": "acc-1",
            "refresh": "ref-1"
        })))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/me/"))
        .and(header("authorization", "Bearer acc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_login_resolves_to_an_authenticated_state() {
    init_tracing();
    let mock_server = MockServer::start().await;
    mount_login(&mock_server).await;

    let (session, store) = session_with_store(&mock_server);
    assert!(session.state().loading);

    let user = session.login("ada@example.com", "hunter2").await.unwrap();
    assert_eq!(user.email, "ada@example.com");

    let state = session.state();
    assert!(state.is_authenticated);
    assert!(!state.loading);
    assert!(state.is_consistent());
    assert_eq!(store.get(TokenKind::Access).as_deref(), Some("acc-1"));
    assert_eq!(store.get(TokenKind::Refresh).as_deref(), Some("ref-1"));
}

#[tokio::test]
async fn test_rejected_login_resets_state_and_leaves_store_untouched() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/login/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})),
        )
        .mount(&mock_server)
        .await;

    let (session, store) = session_with_store(&mock_server);
    let err = session.login("ada@example.com", "wrong").await.unwrap_err();
    assert!(err.is_auth_expired());

    let state = session.state();
    assert!(state.user.is_none());
    assert!(!state.is_authenticated);
    assert!(!state.loading);
    assert!(state.is_consistent());
    assert_eq!(store.get(TokenKind::Access), None);
}

#[tokio::test]
async fn test_register_logs_in_with_the_same_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/register/"))
        .and(body_json(json!({
            "email": "ada@example.com",
            "password": "hunter2",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "phone": "+33600000000"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "user": user_json(),
            "access": "ignored",
            "refresh": "ignored"
        })))
        .mount(&mock_server)
        .await;
    mount_login(&mock_server).await;

    let (session, store) = session_with_store(&mock_server);
    let request = RegisterRequest {
        email: "ada@example.com".to_string(),
        password: "hunter2".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        phone: "+33600000000".to_string(),
    };
    session.register(&request).await.unwrap();

    let state = session.state();
    assert!(state.is_authenticated);
    assert!(state.is_consistent());
    // Tokens come from the follow-up login, not the register response.
    assert_eq!(store.get(TokenKind::Access).as_deref(), Some("acc-1"));

    let logins = mock_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/users/login/")
        .count();
    assert_eq!(logins, 1);
}

#[tokio::test]
async fn test_failed_registration_leaves_no_session_behind() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/register/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "email already registered"})),
        )
        .mount(&mock_server)
        .await;

    let (session, store) = session_with_store(&mock_server);
    let request = RegisterRequest {
        email: "ada@example.com".to_string(),
        password: "hunter2".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        phone: "+33600000000".to_string(),
    };
    session.register(&request).await.unwrap_err();

    let state = session.state();
    assert!(state.user.is_none());
    assert!(state.is_consistent());
    assert_eq!(store.get(TokenKind::Access), None);

    let logins = mock_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/users/login/")
        .count();
    assert_eq!(logins, 0);
}

#[tokio::test]
async fn test_logout_clears_tokens_and_state() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server).await;

    let (session, store) = session_with_store(&mock_server);
    session.login("ada@example.com", "hunter2").await.unwrap();
    assert!(session.is_authenticated());

    session.logout();

    let state = session.state();
    assert!(state.user.is_none());
    assert!(!state.is_authenticated);
    assert!(state.is_consistent());
    assert_eq!(store.get(TokenKind::Access), None);
    assert_eq!(store.get(TokenKind::Refresh), None);
}

#[tokio::test]
async fn test_check_auth_swallows_backend_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database exploded"))
        .mount(&mock_server)
        .await;

    let (session, _store) = session_with_store(&mock_server);
    session.check_auth().await;

    let state = session.state();
    assert!(state.user.is_none());
    assert!(!state.is_authenticated);
    assert!(!state.loading);
    assert!(state.is_consistent());
}

#[tokio::test]
async fn test_check_auth_reuses_the_cached_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "acc-1",
            "refresh": "ref-1"
        })))
        .mount(&mock_server)
        .await;

    // Only the login itself may fetch the user record.
    Mock::given(method("GET"))
        .and(path("/users/me/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (session, _store) = session_with_store(&mock_server);
    session.login("ada@example.com", "hunter2").await.unwrap();

    session.check_auth().await;
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_update_profile_without_a_user_is_a_no_op() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/users/me/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (session, _store) = session_with_store(&mock_server);
    let before = session.state();

    let result = session
        .update_profile(&ProfileUpdate {
            email: Some("new@example.com".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(result.is_none());
    assert_eq!(session.state(), before);
}

#[tokio::test]
async fn test_failed_profile_update_keeps_the_session() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server).await;

    Mock::given(method("PUT"))
        .and(path("/users/me/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let (session, _store) = session_with_store(&mock_server);
    session.login("ada@example.com", "hunter2").await.unwrap();

    session
        .update_profile(&ProfileUpdate {
            pollution_threshold: Some(42.0),
            ..Default::default()
        })
        .await
        .unwrap_err();

    let state = session.state();
    assert!(state.is_authenticated);
    assert!(state.user.is_some());
    assert!(!state.loading);
    assert!(state.is_consistent());
}

#[tokio::test]
async fn test_profile_update_sends_only_present_fields() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server).await;

    Mock::given(method("PUT"))
        .and(path("/users/me/"))
        .and(body_json(json!({"threshold": 42.0, "receive_alerts": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .mount(&mock_server)
        .await;

    let (session, _store) = session_with_store(&mock_server);
    session.login("ada@example.com", "hunter2").await.unwrap();

    let updated = session
        .update_profile(&ProfileUpdate {
            pollution_threshold: Some(42.0),
            receive_alerts: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(updated.is_some());
}

#[tokio::test]
async fn test_update_threshold_patches_the_user_in_place() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server).await;

    // The ATMO index never reaches the backend.
    Mock::given(method("PUT"))
        .and(path("/users/threshold/"))
        .and(body_json(json!({"pm25": 40.0, "pm10": 55.0, "no2": 85.0, "o3": 105.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&mock_server)
        .await;

    let (session, _store) = session_with_store(&mock_server);
    session.login("ada@example.com", "hunter2").await.unwrap();

    let thresholds = AlertThreshold {
        pm25: 40.0,
        pm10: 55.0,
        no2: 85.0,
        o3: 105.0,
        atmo: Some(3.0),
    };
    session.update_threshold(&thresholds).await.unwrap();

    let state = session.state();
    let user = state.user.expect("still logged in");
    assert_eq!(user.alert_thresholds, Some(thresholds));
    assert!(state.is_authenticated);
}
