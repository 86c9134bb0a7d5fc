pub mod organization;
pub mod person;

pub use organization::{LogoSource, Organization, OrganizationDraft, OrganizationField};
pub use person::{OrganizationRef, OrganizationSummary, Person, PersonDraft, PersonField};
