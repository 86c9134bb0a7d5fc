use serde_json::Value;

use super::attachment::{decode_data_uri, is_data_uri};
use super::error::GatewayError;
use crate::models::{LogoSource, OrganizationDraft, PersonDraft};
use crate::types::Operation;

/// Request body, built before the request so encoding failures never reach
/// the network.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    Json(Value),
    Form(Vec<FormPart>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub value: FormValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    File {
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: FormValue::Text(value.into()),
        }
    }
}

/// Organizations always go out as multipart so logo images are sent as raw
/// bytes. Create sends every text field (empty when unset); update sends only
/// the fields present in the draft.
pub fn organization_form(draft: &OrganizationDraft, operation: Operation) -> Result<Payload, GatewayError> {
    let mut parts = Vec::new();
    let fields = [("name", &draft.name), ("email", &draft.email), ("website", &draft.website)];

    for (name, value) in fields {
        match (operation, value) {
            (_, Some(v)) => parts.push(FormPart::text(name, v.clone())),
            (Operation::Create, None) => parts.push(FormPart::text(name, "")),
            _ => {}
        }
    }

    if let Some(logo) = &draft.logo {
        if let Some(part) = logo_part(logo)? {
            parts.push(part);
        }
    }

    Ok(Payload::Form(parts))
}

fn logo_part(logo: &LogoSource) -> Result<Option<FormPart>, GatewayError> {
    let value = match logo {
        LogoSource::Inline(s) if s.is_empty() => return Ok(None),
        LogoSource::Inline(s) if is_data_uri(s) => {
            let decoded = decode_data_uri(s)?;
            FormValue::File {
                file_name: "logo.png".to_string(),
                mime: decoded.mime,
                bytes: decoded.bytes,
            }
        }
        LogoSource::Inline(s) => FormValue::Text(s.clone()),
        LogoSource::File { file_name, mime, bytes } => FormValue::File {
            file_name: file_name.clone(),
            mime: mime.clone(),
            bytes: bytes.clone(),
        },
    };

    Ok(Some(FormPart {
        name: "logo".to_string(),
        value,
    }))
}

/// People carry no attachments and go out as JSON.
pub fn person_json(draft: &PersonDraft) -> Result<Payload, GatewayError> {
    serde_json::to_value(draft)
        .map(Payload::Json)
        .map_err(|e| GatewayError::Encoding(format!("failed to encode person: {e}")))
}
