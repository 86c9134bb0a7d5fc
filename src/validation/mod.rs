//! Pre-submit checks for the organization, person and login forms.
//!
//! Every field is checked and all failures are reported together. Nothing
//! here touches the network.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::models::{OrganizationDraft, PersonDraft};
use crate::types::Operation;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .expect("email pattern is valid")
});

/// Per-field validation failures, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub field_errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }

    fn add(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .field_errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_valid_website(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn check_length(errors: &mut ValidationErrors, field: &str, label: &str, value: &str, min: usize, max: usize) {
    let len = value.chars().count();
    if len < min {
        errors.add(field, format!("{} must be at least {} characters", label, min));
    } else if len > max {
        errors.add(field, format!("{} must be at most {} characters", label, max));
    }
}

/// Check a required text field on create; on update only when supplied.
fn check_name(
    errors: &mut ValidationErrors,
    operation: Operation,
    field: &str,
    label: &str,
    value: &Option<String>,
    max: usize,
) {
    match (present(value), value.is_some(), operation) {
        (Some(v), _, _) => check_length(errors, field, label, v, 2, max),
        (None, true, _) | (None, false, Operation::Create) => {
            errors.add(field, format!("{} is required", label));
        }
        (None, false, _) => {}
    }
}

fn check_email(errors: &mut ValidationErrors, value: &Option<String>) {
    if let Some(email) = present(value) {
        if !is_valid_email(email) {
            errors.add("email", "Invalid email address");
        }
    }
}

pub fn validate_organization(draft: &OrganizationDraft, operation: Operation) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    check_name(&mut errors, operation, "name", "Company name", &draft.name, 100);
    check_email(&mut errors, &draft.email);
    if let Some(website) = present(&draft.website) {
        if !is_valid_website(website) {
            errors.add("website", "Website must be a valid URL");
        }
    }

    errors.into_result()
}

pub fn validate_person(draft: &PersonDraft, operation: Operation) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    check_name(&mut errors, operation, "first_name", "First name", &draft.first_name, 50);
    check_name(&mut errors, operation, "last_name", "Last name", &draft.last_name, 50);
    check_email(&mut errors, &draft.email);

    let organization_missing = present(&draft.organization_id).is_none();
    if organization_missing && (draft.organization_id.is_some() || operation == Operation::Create) {
        errors.add("company_id", "Company is required");
    }

    errors.into_result()
}

/// Drafts that can be checked before they are submitted
pub trait Validate {
    fn validate(&self, operation: Operation) -> Result<(), ValidationErrors>;
}

impl Validate for OrganizationDraft {
    fn validate(&self, operation: Operation) -> Result<(), ValidationErrors> {
        validate_organization(self, operation)
    }
}

impl Validate for PersonDraft {
    fn validate(&self, operation: Operation) -> Result<(), ValidationErrors> {
        validate_person(self, operation)
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let email = email.trim();
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.add("email", "Invalid email address");
    }
    if password.is_empty() {
        errors.add("password", "Password is required");
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organization_create_requires_name() {
        let err = validate_organization(&OrganizationDraft::default(), Operation::Create).unwrap_err();
        assert_eq!(err.get("name"), Some("Company name is required"));
    }

    #[test]
    fn organization_collects_every_field_error() {
        let draft = OrganizationDraft::new("A")
            .with_email("not-an-email")
            .with_website("ftp://files.example.com");
        let err = validate_organization(&draft, Operation::Create).unwrap_err();

        assert_eq!(err.field_errors.len(), 3);
        assert!(err.get("name").unwrap().contains("at least 2"));
        assert!(err.get("email").is_some());
        assert!(err.get("website").is_some());
    }

    #[test]
    fn organization_name_length_counts_characters() {
        let ok = OrganizationDraft::new("Ünï");
        assert!(validate_organization(&ok, Operation::Create).is_ok());

        let long = OrganizationDraft::new("x".repeat(101));
        let err = validate_organization(&long, Operation::Create).unwrap_err();
        assert!(err.get("name").unwrap().contains("at most 100"));
    }

    #[test]
    fn organization_update_skips_absent_fields() {
        let draft = OrganizationDraft {
            website: Some("https://acme.io".into()),
            ..OrganizationDraft::default()
        };
        assert!(validate_organization(&draft, Operation::Update).is_ok());

        let blanked = OrganizationDraft::new("   ");
        let err = validate_organization(&blanked, Operation::Update).unwrap_err();
        assert_eq!(err.get("name"), Some("Company name is required"));
    }

    #[test]
    fn person_requires_names_and_organization() {
        let draft = PersonDraft {
            first_name: Some("J".into()),
            ..PersonDraft::default()
        };
        let err = validate_person(&draft, Operation::Create).unwrap_err();

        assert!(err.get("first_name").unwrap().contains("at least 2"));
        assert_eq!(err.get("last_name"), Some("Last name is required"));
        assert_eq!(err.get("company_id"), Some("Company is required"));
    }

    #[test]
    fn person_valid_draft_passes() {
        let draft = PersonDraft::new("Jane", "Doe", "c1").with_email("jane@acme.io");
        assert!(validate_person(&draft, Operation::Create).is_ok());
        assert!(validate_person(&PersonDraft::default(), Operation::Update).is_ok());
    }

    #[test]
    fn login_checks_email_and_password() {
        let err = validate_login("", "").unwrap_err();
        assert_eq!(err.get("email"), Some("Email is required"));
        assert_eq!(err.get("password"), Some("Password is required"));

        assert!(validate_login("admin@acme", "pw").is_err());
        assert!(validate_login("admin@acme.io", "pw").is_ok());
    }

    #[test]
    fn display_joins_fields_in_order() {
        let err = validate_login("", "").unwrap_err();
        assert_eq!(err.to_string(), "email: Email is required; password: Password is required");
    }
}
