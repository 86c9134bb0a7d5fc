//! Record Gateway: the boundary to the REST backend.
//!
//! [`RecordGateway`] and [`AuthGateway`] are the contracts screens and the
//! session guard depend on. [`HttpGateway`] is the reqwest implementation.

pub mod attachment;
pub mod client;
pub mod error;
pub mod format;
pub mod payload;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::filter::ListRecord;
use crate::models::{Organization, OrganizationDraft, Person, PersonDraft};
use crate::types::{Operation, RecordKind};

pub use client::HttpGateway;
pub use error::GatewayError;
pub use payload::{FormPart, FormValue, Payload};

/// A record type the gateway knows how to address and encode.
pub trait Resource: ListRecord + DeserializeOwned + Clone + Send + Sync + 'static {
    type Draft: Send + Sync;

    const KIND: RecordKind;

    fn id(&self) -> &str;

    /// Request body for a create or update of `draft`
    fn encode(draft: &Self::Draft, operation: Operation) -> Result<Payload, GatewayError>;
}

impl Resource for Organization {
    type Draft = OrganizationDraft;

    const KIND: RecordKind = RecordKind::Organization;

    fn id(&self) -> &str {
        &self.id
    }

    fn encode(draft: &OrganizationDraft, operation: Operation) -> Result<Payload, GatewayError> {
        payload::organization_form(draft, operation)
    }
}

impl Resource for Person {
    type Draft = PersonDraft;

    const KIND: RecordKind = RecordKind::Person;

    fn id(&self) -> &str {
        &self.id
    }

    fn encode(draft: &PersonDraft, _operation: Operation) -> Result<Payload, GatewayError> {
        payload::person_json(draft)
    }
}

/// CRUD over one record collection.
#[async_trait]
pub trait RecordGateway<R: Resource>: Send + Sync {
    async fn list(&self) -> Result<Vec<R>, GatewayError>;

    async fn get_by_id(&self, id: &str) -> Result<R, GatewayError>;

    /// The backend assigns `id` and `createdAt`.
    async fn create(&self, draft: &R::Draft) -> Result<R, GatewayError>;

    async fn update(&self, id: &str, draft: &R::Draft) -> Result<R, GatewayError>;

    async fn delete(&self, id: &str) -> Result<(), GatewayError>;
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub token: String,
    pub user_label: String,
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Credentials, GatewayError>;
}
