use tracing::{error, info};

use super::list_screen::ListScreen;
use super::notice::Notice;
use crate::error::AppError;
use crate::gateway::{RecordGateway, Resource};
use crate::models::{Organization, Person};
use crate::types::Operation;
use crate::validation::Validate;

/// Create or edit dialog for one record type.
pub struct RecordForm<R: Resource> {
    editing: Option<String>,
    pub draft: R::Draft,
}

pub type OrganizationForm = RecordForm<Organization>;
pub type PersonForm = RecordForm<Person>;

impl<R> RecordForm<R>
where
    R: Resource,
    R::Draft: Validate,
{
    pub fn create(draft: R::Draft) -> Self {
        Self { editing: None, draft }
    }

    /// Edit `id`; `draft` holds only the fields to change.
    pub fn edit(id: impl Into<String>, draft: R::Draft) -> Self {
        Self {
            editing: Some(id.into()),
            draft,
        }
    }

    /// Edit form prefilled from an existing record
    pub fn for_record(record: &R) -> Self
    where
        R::Draft: for<'a> From<&'a R>,
    {
        Self::edit(record.id(), R::Draft::from(record))
    }

    pub fn operation(&self) -> Operation {
        if self.editing.is_some() {
            Operation::Update
        } else {
            Operation::Create
        }
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Validate, send, then refresh `screen` whether or not the send worked.
    /// A draft that fails validation never reaches the gateway.
    pub async fn submit<G>(&self, gateway: &G, screen: &mut ListScreen<R>) -> Result<R, AppError>
    where
        G: RecordGateway<R> + ?Sized,
    {
        let operation = self.operation();
        self.draft.validate(operation)?;

        let label = R::KIND.label();
        let result = match &self.editing {
            Some(id) => gateway.update(id, &self.draft).await,
            None => gateway.create(&self.draft).await,
        };

        let verb = match operation {
            Operation::Create => "create",
            Operation::Update => "update",
        };
        match result {
            Ok(record) => {
                info!(kind = label, id = record.id(), "{}d record", verb);
                // A failed reload leaves its own notice on the screen
                if screen.refresh(gateway).await.is_ok() {
                    screen.set_notice(Notice::success(format!("{} {}d", capitalize(label), verb)));
                }
                Ok(record)
            }
            Err(e) => {
                error!(kind = label, error = %e, "failed to {} record", verb);
                // Reload anyway, then show the mutation failure over any reload notice
                let _ = screen.refresh(gateway).await;
                screen.set_notice(Notice::from_error(&format!("Failed to {} {}", verb, label), &e));
                Err(e.into())
            }
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
