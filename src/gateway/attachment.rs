use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

use super::error::GatewayError;

/// Bytes decoded from a `data:` URI, ready to upload as a file part.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAttachment {
    pub mime: String,
    pub bytes: Vec<u8>,
}

pub fn is_data_uri(value: &str) -> bool {
    value.starts_with("data:")
}

/// Decode `data:<mime>;base64,<payload>` into raw bytes.
pub fn decode_data_uri(uri: &str) -> Result<DecodedAttachment, GatewayError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| GatewayError::Encoding("not a data URI".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| GatewayError::Encoding("data URI has no payload separator".to_string()))?;

    let mut params = header.split(';');
    let mime = params.next().unwrap_or_default().trim();
    if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err(GatewayError::Encoding("only base64 data URIs are supported".to_string()));
    }

    let bytes = BASE64_STANDARD
        .decode(payload.trim())
        .map_err(|e| GatewayError::Encoding(format!("invalid base64 payload: {e}")))?;

    Ok(DecodedAttachment {
        mime: if mime.is_empty() {
            "application/octet-stream".to_string()
        } else {
            mime.to_string()
        },
        bytes,
    })
}

/// MIME type for a logo file picked from disk, guessed from its extension
pub fn mime_for_file_name(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .to_string()
}
