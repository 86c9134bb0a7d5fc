use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use super::error::GatewayError;
use super::format::{error_message, Envelope, LoginData};
use super::payload::{FormPart, FormValue, Payload};
use super::{AuthGateway, Credentials, RecordGateway, Resource};
use crate::config::ApiConfig;
use crate::session::SessionStore;
use crate::types::Operation;

/// HTTP implementation of the gateway contracts.
///
/// Reads the bearer token from the [`SessionStore`] on every request, so a
/// login or logout takes effect for the next call without rebuilding the
/// client.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: Url,
    session: SessionStore,
}

impl HttpGateway {
    pub fn new(config: &ApiConfig, session: SessionStore) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GatewayError::Network(format!("failed to build HTTP client: {e}")))?;

        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| GatewayError::Network(format!("invalid base URL '{}': {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::Network(format!("invalid base URL '{}'", config.base_url)));
        }

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Base URL plus `segments`, each percent-encoded as a single path
    /// segment so ids cannot change the endpoint.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        payload: Payload,
    ) -> Result<Envelope<T>, GatewayError> {
        let url = self.endpoint(segments);
        let mut request = self.client.request(method.clone(), url.clone());

        // No token, no header: never send an empty Authorization value
        if let Some(token) = self.session.token().await {
            request = request.bearer_auth(token);
        }

        request = match payload {
            Payload::Empty => request,
            Payload::Json(body) => request.json(&body),
            Payload::Form(parts) => request.multipart(build_form(parts)?),
        };

        debug!(%method, %url, "sending request");
        let response = request.send().await.map_err(|e| {
            error!(%method, %url, error = %e, "request failed");
            GatewayError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%method, %url, status = status.as_u16(), "response received");

        if !status.is_success() {
            let message = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            error!(%method, %url, status = status.as_u16(), %message, "backend rejected request");
            return Err(GatewayError::from_status(status.as_u16(), message));
        }

        // 204-style empty bodies carry no envelope
        if body.trim().is_empty() {
            return Ok(Envelope {
                success: None,
                message: None,
                data: None,
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            error!(%method, %url, error = %e, "undecodable response body");
            GatewayError::MalformedResponse(e.to_string())
        })?;

        if envelope.success == Some(false) {
            let message = envelope.message.unwrap_or_else(|| "request rejected".to_string());
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(envelope)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        payload: Payload,
    ) -> Result<T, GatewayError> {
        self.send::<T>(method, segments, payload)
            .await?
            .data
            .ok_or_else(|| GatewayError::MalformedResponse(format!("response to /{} has no data", segments.join("/"))))
    }
}

fn build_form(parts: Vec<FormPart>) -> Result<Form, GatewayError> {
    let mut form = Form::new();
    for FormPart { name, value } in parts {
        form = match value {
            FormValue::Text(text) => form.text(name, text),
            FormValue::File { file_name, mime, bytes } => {
                let part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&mime)
                    .map_err(|e| GatewayError::Encoding(format!("invalid MIME type '{}': {e}", mime)))?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

#[async_trait]
impl<R: Resource> RecordGateway<R> for HttpGateway {
    async fn list(&self) -> Result<Vec<R>, GatewayError> {
        let records: Vec<R> = self
            .fetch(Method::GET, &[R::KIND.collection(), R::KIND.list_action()], Payload::Empty)
            .await?;
        debug!(kind = R::KIND.label(), count = records.len(), "listed records");
        Ok(records)
    }

    async fn get_by_id(&self, id: &str) -> Result<R, GatewayError> {
        self.fetch(Method::GET, &[R::KIND.collection(), "get_by_id", id], Payload::Empty)
            .await
    }

    async fn create(&self, draft: &R::Draft) -> Result<R, GatewayError> {
        let payload = R::encode(draft, Operation::Create)?;
        let record: R = self
            .fetch(Method::POST, &[R::KIND.collection(), "create"], payload)
            .await?;
        info!(kind = R::KIND.label(), id = record.id(), "record created");
        Ok(record)
    }

    async fn update(&self, id: &str, draft: &R::Draft) -> Result<R, GatewayError> {
        let payload = R::encode(draft, Operation::Update)?;
        let record: R = self
            .fetch(Method::PUT, &[R::KIND.collection(), "update_by_id", id], payload)
            .await?;
        info!(kind = R::KIND.label(), id, "record updated");
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        self.send::<Value>(Method::DELETE, &[R::KIND.collection(), "delete", id], Payload::Empty)
            .await?;
        info!(kind = R::KIND.label(), id, "record deleted");
        Ok(())
    }
}

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Credentials, GatewayError> {
        let body = json!({
            "email": email,
            "password": password,
            "role": "admin",
        });

        let data: LoginData = self.fetch(Method::POST, &["user", "login"], Payload::Json(body)).await?;
        match (data.user, data.token) {
            (Some(user), Some(token)) if !token.is_empty() => Ok(Credentials {
                token,
                user_label: user.label(),
            }),
            _ => Err(GatewayError::MalformedResponse(
                "login response is missing the user or token".to_string(),
            )),
        }
    }
}
