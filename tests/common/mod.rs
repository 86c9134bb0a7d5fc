#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use salessync::config::ApiConfig;
use salessync::gateway::HttpGateway;
use salessync::session::{MemoryTokenStore, PersistedSession, SessionGuard, SessionStore, TokenStore};
use serde_json::{json, Value};
use wiremock::MockServer;

/// A mock backend plus a gateway pointed at it
pub struct TestBackend {
    pub server: MockServer,
    pub tokens: Arc<dyn TokenStore>,
    pub store: SessionStore,
    pub gateway: HttpGateway,
}

impl TestBackend {
    /// No stored token
    pub async fn anonymous() -> Result<Self> {
        Self::with_tokens(Arc::new(MemoryTokenStore::new())).await
    }

    /// Session restored from a stored token
    pub async fn logged_in(token: &str) -> Result<Self> {
        let tokens = MemoryTokenStore::with_session(PersistedSession {
            token: token.to_string(),
            user_label: Some("Admin User".to_string()),
        });
        Self::with_tokens(Arc::new(tokens)).await
    }

    pub async fn with_tokens(tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let server = MockServer::start().await;
        let store = SessionStore::restore(tokens.clone());
        let gateway = HttpGateway::new(&api_config(&server.uri()), store.clone())?;

        Ok(Self {
            server,
            tokens,
            store,
            gateway,
        })
    }

    pub fn guard(&self) -> SessionGuard {
        SessionGuard::new(self.store.clone())
    }

    /// Paths of every request the mock server saw, in order
    pub async fn request_paths(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url.path()))
            .collect()
    }
}

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: format!("{}/api/v1", base_url),
        timeout_secs: 5,
        user_agent: "salessync-tests".to_string(),
    }
}

/// Wrap `data` the way the backend does
pub fn envelope(data: Value) -> Value {
    json!({ "success": true, "message": "ok", "data": data })
}

pub fn company_json(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "email": format!("info@{}.io", name.to_lowercase()),
        "website": format!("https://{}.io", name.to_lowercase()),
        "createdAt": "2024-03-01T10:00:00.000Z"
    })
}

pub fn employee_json(id: &str, first: &str, last: &str, company: Value) -> Value {
    json!({
        "_id": id,
        "first_name": first,
        "last_name": last,
        "company_id": company,
        "email": format!("{}@example.com", first.to_lowercase()),
        "phone": "555-0100"
    })
}
