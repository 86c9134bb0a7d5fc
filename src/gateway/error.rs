use thiserror::Error;

/// Failure of a single gateway call. Never fatal: callers surface it as a
/// notice and keep the screen usable.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid attachment: {0}")]
    Encoding(String),
}

impl GatewayError {
    /// Map a non-2xx status and server message to the matching variant
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => GatewayError::Unauthorized(message),
            404 => GatewayError::NotFound(message),
            _ => GatewayError::Status { status, message },
        }
    }

    /// HTTP status behind the error, when there was a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GatewayError::Unauthorized(_) => Some(401),
            GatewayError::NotFound(_) => Some(404),
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for showing to the user
    pub fn message(&self) -> &str {
        match self {
            GatewayError::Network(msg) => msg,
            GatewayError::Timeout(msg) => msg,
            GatewayError::Unauthorized(msg) => msg,
            GatewayError::NotFound(msg) => msg,
            GatewayError::Status { message, .. } => message,
            GatewayError::MalformedResponse(msg) => msg,
            GatewayError::Encoding(msg) => msg,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            GatewayError::Network(_) => "NETWORK_ERROR",
            GatewayError::Timeout(_) => "TIMEOUT",
            GatewayError::Unauthorized(_) => "UNAUTHORIZED",
            GatewayError::NotFound(_) => "NOT_FOUND",
            GatewayError::Status { .. } => "BAD_STATUS",
            GatewayError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            GatewayError::Encoding(_) => "INVALID_ATTACHMENT",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound(_))
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout(err.to_string())
        } else if err.is_decode() {
            GatewayError::MalformedResponse(err.to_string())
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_statuses_to_variants() {
        assert_eq!(GatewayError::from_status(401, "bad password"), GatewayError::Unauthorized("bad password".into()));
        assert!(GatewayError::from_status(404, "gone").is_not_found());
        assert_eq!(GatewayError::from_status(500, "boom").status_code(), Some(500));
        assert_eq!(GatewayError::Network("down".into()).status_code(), None);
    }
}
