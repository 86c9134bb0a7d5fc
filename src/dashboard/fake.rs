use std::sync::Mutex;

use async_trait::async_trait;

use crate::gateway::{GatewayError, RecordGateway, Resource};

type Builder<R> = Box<dyn Fn(&str, &<R as Resource>::Draft) -> R + Send + Sync>;

/// In-memory gateway that records every call it receives.
pub struct FakeGateway<R: Resource> {
    pub records: Mutex<Vec<R>>,
    pub calls: Mutex<Vec<String>>,
    pub fail_list: Mutex<Option<GatewayError>>,
    pub fail_mutations: Mutex<Option<GatewayError>>,
    build: Builder<R>,
}

impl<R: Resource> FakeGateway<R> {
    pub fn new(records: Vec<R>, build: impl Fn(&str, &R::Draft) -> R + Send + Sync + 'static) -> Self {
        Self {
            records: Mutex::new(records),
            calls: Mutex::new(Vec::new()),
            fail_list: Mutex::new(None),
            fail_mutations: Mutex::new(None),
            build: Box::new(build),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn mutation_failure(&self) -> Result<(), GatewayError> {
        match self.fail_mutations.lock().unwrap().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<R: Resource> RecordGateway<R> for FakeGateway<R> {
    async fn list(&self) -> Result<Vec<R>, GatewayError> {
        self.record("list".into());
        if let Some(e) = self.fail_list.lock().unwrap().clone() {
            return Err(e);
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<R, GatewayError> {
        self.record(format!("get {}", id));
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("{} not found", id)))
    }

    async fn create(&self, draft: &R::Draft) -> Result<R, GatewayError> {
        self.record("create".into());
        self.mutation_failure()?;
        let mut records = self.records.lock().unwrap();
        let created = (self.build)(&format!("new-{}", records.len() + 1), draft);
        records.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, draft: &R::Draft) -> Result<R, GatewayError> {
        self.record(format!("update {}", id));
        self.mutation_failure()?;
        let mut records = self.records.lock().unwrap();
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| GatewayError::NotFound(format!("{} not found", id)))?;
        *slot = (self.build)(id, draft);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        self.record(format!("delete {}", id));
        self.mutation_failure()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(GatewayError::NotFound(format!("{} not found", id)));
        }
        Ok(())
    }
}

pub fn organization(id: &str, name: &str) -> crate::models::Organization {
    crate::models::Organization {
        id: id.to_string(),
        name: name.to_string(),
        email: None,
        website: None,
        logo: None,
        user_id: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn organization_gateway(records: Vec<crate::models::Organization>) -> FakeGateway<crate::models::Organization> {
    FakeGateway::new(records, |id, draft: &crate::models::OrganizationDraft| {
        let mut org = organization(id, draft.name.as_deref().unwrap_or_default());
        org.email = draft.email.clone();
        org.website = draft.website.clone();
        org
    })
}
