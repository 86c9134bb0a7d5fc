use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::{FilterError, ListRecord};

/// An organization as returned by the backend (wire name "company")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// URL or data URI of the logo image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Logo attachment supplied with a create or update.
#[derive(Debug, Clone, PartialEq)]
pub enum LogoSource {
    /// A data URI or plain URL string, as produced by an upload widget
    Inline(String),
    /// Raw file contents read from disk
    File {
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

/// Fields for creating an organization, or the subset to change on update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrganizationDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub logo: Option<LogoSource>,
}

impl OrganizationDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    pub fn with_logo(mut self, logo: LogoSource) -> Self {
        self.logo = Some(logo);
        self
    }
}

impl From<&Organization> for OrganizationDraft {
    fn from(org: &Organization) -> Self {
        Self {
            name: Some(org.name.clone()),
            email: org.email.clone(),
            website: org.website.clone(),
            logo: org.logo.clone().map(LogoSource::Inline),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizationField {
    Name,
    Email,
    Website,
    CreatedAt,
}

impl OrganizationField {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizationField::Name => "name",
            OrganizationField::Email => "email",
            OrganizationField::Website => "website",
            OrganizationField::CreatedAt => "createdAt",
        }
    }
}

impl fmt::Display for OrganizationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrganizationField {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(OrganizationField::Name),
            "email" => Ok(OrganizationField::Email),
            "website" => Ok(OrganizationField::Website),
            "createdAt" | "created_at" => Ok(OrganizationField::CreatedAt),
            other => Err(FilterError::InvalidSortField(other.to_string())),
        }
    }
}

impl ListRecord for Organization {
    type Field = OrganizationField;

    const DEFAULT_SORT: OrganizationField = OrganizationField::Name;

    fn search_values(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.name.as_str()),
            self.email.as_deref(),
            self.website.as_deref(),
        ]
    }

    fn sort_value(&self, field: OrganizationField) -> Option<Cow<'_, str>> {
        match field {
            OrganizationField::Name => Some(Cow::Borrowed(self.name.as_str())),
            OrganizationField::Email => self.email.as_deref().map(Cow::Borrowed),
            OrganizationField::Website => self.website.as_deref().map(Cow::Borrowed),
            OrganizationField::CreatedAt => self.created_at.map(|ts| Cow::Owned(ts.to_rfc3339())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_payload() {
        let org: Organization = serde_json::from_value(serde_json::json!({
            "_id": "c1",
            "name": "Acme",
            "email": "hello@acme.io",
            "user_id": "u1",
            "createdAt": "2024-03-01T10:00:00.000Z",
            "__v": 0
        }))
        .unwrap();

        assert_eq!(org.id, "c1");
        assert_eq!(org.website, None);
        assert_eq!(org.created_at.unwrap().to_rfc3339(), "2024-03-01T10:00:00+00:00");
    }

    #[test]
    fn parses_sort_fields() {
        assert_eq!("createdAt".parse::<OrganizationField>().unwrap(), OrganizationField::CreatedAt);
        assert!("logo".parse::<OrganizationField>().is_err());
    }
}
