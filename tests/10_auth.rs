mod common;

use std::sync::Arc;

use anyhow::Result;
use salessync::gateway::{AuthGateway, GatewayError, RecordGateway};
use salessync::models::Organization;
use salessync::session::{AuthState, FileTokenStore, GuardOutcome, SessionStore, TokenStore, LOGIN_PATH};
use salessync::AppError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{envelope, TestBackend};

fn login_ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(envelope(json!({
        "user": { "email": "admin@salessync.io", "name": "Ada Admin" },
        "token": "jwt-123"
    })))
}

#[tokio::test]
async fn login_posts_admin_role_and_returns_credentials() -> Result<()> {
    let backend = TestBackend::anonymous().await?;
    Mock::given(method("POST"))
        .and(path("/api/v1/user/login"))
        .and(body_json(json!({
            "email": "admin@salessync.io",
            "password": "secret",
            "role": "admin"
        })))
        .respond_with(login_ok())
        .expect(1)
        .mount(&backend.server)
        .await;

    let credentials = backend.gateway.authenticate("admin@salessync.io", "secret").await?;
    assert_eq!(credentials.token, "jwt-123");
    assert_eq!(credentials.user_label, "Ada Admin");

    // Anonymous requests never carry an Authorization header
    let requests = backend.server.received_requests().await.unwrap_or_default();
    assert!(!requests[0].headers.contains_key("authorization"));
    Ok(())
}

#[tokio::test]
async fn login_persists_token_and_later_requests_send_bearer() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::in_dir(dir.path()));
    let backend = TestBackend::with_tokens(tokens.clone()).await?;

    Mock::given(method("POST"))
        .and(path("/api/v1/user/login"))
        .respond_with(login_ok())
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/company/get_all_companies"))
        .and(header("authorization", "Bearer jwt-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .expect(1)
        .mount(&backend.server)
        .await;

    let guard = backend.guard();
    guard.login(&backend.gateway, "admin@salessync.io", "secret").await?;
    assert_eq!(guard.state().await, AuthState::Authenticated);

    let saved = std::fs::read_to_string(dir.path().join("session.json"))?;
    let saved: serde_json::Value = serde_json::from_str(&saved)?;
    assert_eq!(saved["authToken"], "jwt-123");

    let orgs = RecordGateway::<Organization>::list(&backend.gateway).await?;
    assert!(orgs.is_empty());

    // A fresh start restores the session from disk without asking the backend
    let restored = SessionStore::restore(tokens);
    assert!(restored.is_authenticated().await);
    assert_eq!(restored.user_label().await.as_deref(), Some("Ada Admin"));
    Ok(())
}

#[tokio::test]
async fn rejected_login_leaves_session_unauthenticated() -> Result<()> {
    let backend = TestBackend::anonymous().await?;
    Mock::given(method("POST"))
        .and(path("/api/v1/user/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Invalid email or password"
        })))
        .mount(&backend.server)
        .await;

    let guard = backend.guard();
    let err = guard.login(&backend.gateway, "admin@salessync.io", "wrong").await.unwrap_err();

    match err {
        AppError::Authentication(GatewayError::Unauthorized(message)) => {
            assert_eq!(message, "Invalid email or password");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(guard.state().await, AuthState::Unauthenticated);
    assert_eq!(backend.tokens.load()?, None);
    Ok(())
}

#[tokio::test]
async fn login_response_without_token_is_malformed() -> Result<()> {
    let backend = TestBackend::anonymous().await?;
    Mock::given(method("POST"))
        .and(path("/api/v1/user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "user": { "email": "admin@salessync.io" }
        }))))
        .mount(&backend.server)
        .await;

    let err = backend.gateway.authenticate("admin@salessync.io", "secret").await.unwrap_err();
    assert!(matches!(err, GatewayError::MalformedResponse(_)));
    Ok(())
}

#[tokio::test]
async fn logout_clears_token_and_guards_protected_views() -> Result<()> {
    let backend = TestBackend::logged_in("stored-token").await?;
    let guard = backend.guard();
    assert_eq!(guard.state().await, AuthState::Authenticated);

    guard.logout().await?;

    assert_eq!(backend.tokens.load()?, None);
    assert_eq!(backend.store.token().await, None);
    let outcome = guard.render(|_| async { "dashboard" }).await;
    assert_eq!(outcome, GuardOutcome::Redirect(LOGIN_PATH));

    // Logout is local only
    assert!(backend.request_paths().await.is_empty());
    Ok(())
}
