use serde::Deserialize;
use serde_json::Value;

/// Response envelope used by every backend endpoint:
/// `{ "success": bool, "message": string, "data": ... }`
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// `data` of a successful login
#[derive(Debug, Deserialize)]
pub struct LoginData {
    #[serde(default)]
    pub user: Option<LoginUser>,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginUser {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl LoginUser {
    /// Display label: the user's name, falling back to the email
    pub fn label(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => self.email.clone(),
        }
    }
}

/// Pull a human-readable message out of an error body, if it has one.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .next()
}
