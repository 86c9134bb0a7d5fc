use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::{FilterError, ListRecord};

/// Link from a person to its organization. The backend sends either the bare
/// id or a populated `{_id, name}` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrganizationRef {
    Id(String),
    Embedded(OrganizationSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl OrganizationRef {
    pub fn id(&self) -> &str {
        match self {
            OrganizationRef::Id(id) => id,
            OrganizationRef::Embedded(summary) => &summary.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            OrganizationRef::Id(_) => None,
            OrganizationRef::Embedded(summary) => Some(summary.name.as_str()),
        }
    }
}

/// A person as returned by the backend (wire name "employee")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "company_id")]
    pub organization: OrganizationRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Alternate location for the populated organization
    #[serde(rename = "company", default, skip_serializing_if = "Option::is_none")]
    pub company: Option<OrganizationSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn organization_id(&self) -> &str {
        self.organization.id()
    }

    /// Name of the linked organization, when the backend populated it
    pub fn organization_name(&self) -> Option<&str> {
        self.organization
            .name()
            .or_else(|| self.company.as_ref().map(|c| c.name.as_str()))
    }
}

/// Fields for creating a person, or the subset to change on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "company_id", skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl PersonDraft {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        organization_id: impl Into<String>,
    ) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            organization_id: Some(organization_id.into()),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

impl From<&Person> for PersonDraft {
    fn from(person: &Person) -> Self {
        Self {
            first_name: Some(person.first_name.clone()),
            last_name: Some(person.last_name.clone()),
            organization_id: Some(person.organization_id().to_string()),
            email: person.email.clone(),
            phone: person.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonField {
    FirstName,
    LastName,
    Email,
    Phone,
    /// Sorts by the linked organization's name
    Organization,
    CreatedAt,
}

impl PersonField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonField::FirstName => "first_name",
            PersonField::LastName => "last_name",
            PersonField::Email => "email",
            PersonField::Phone => "phone",
            PersonField::Organization => "company",
            PersonField::CreatedAt => "createdAt",
        }
    }
}

impl fmt::Display for PersonField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonField {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_name" | "firstName" => Ok(PersonField::FirstName),
            "last_name" | "lastName" => Ok(PersonField::LastName),
            "email" => Ok(PersonField::Email),
            "phone" => Ok(PersonField::Phone),
            "company" | "organization" => Ok(PersonField::Organization),
            "createdAt" | "created_at" => Ok(PersonField::CreatedAt),
            other => Err(FilterError::InvalidSortField(other.to_string())),
        }
    }
}

impl ListRecord for Person {
    type Field = PersonField;

    const DEFAULT_SORT: PersonField = PersonField::FirstName;

    fn search_values(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.first_name.as_str()),
            Some(self.last_name.as_str()),
            self.email.as_deref(),
            self.phone.as_deref(),
            self.organization_name(),
        ]
    }

    fn sort_value(&self, field: PersonField) -> Option<Cow<'_, str>> {
        match field {
            PersonField::FirstName => Some(Cow::Borrowed(self.first_name.as_str())),
            PersonField::LastName => Some(Cow::Borrowed(self.last_name.as_str())),
            PersonField::Email => self.email.as_deref().map(Cow::Borrowed),
            PersonField::Phone => self.phone.as_deref().map(Cow::Borrowed),
            PersonField::Organization => self.organization_name().map(Cow::Borrowed),
            PersonField::CreatedAt => self.created_at.map(|ts| Cow::Owned(ts.to_rfc3339())),
        }
    }
}
