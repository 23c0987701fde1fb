use serde_json::Value;
use thiserror::Error;

/// Failure reported by the transport
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication required")]
    Unauthorized,

    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Backend rejected submitted data; holds its messages verbatim
    #[error("{0}")]
    Validation(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Authentication failures must reach the caller so it can send the
    /// user to the login screen
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Flatten a validation error body into one message.
///
/// Field errors read `"field: message"`; `detail` and `non_field_errors`
/// are kept without a prefix. Entries are joined with `"; "`.
pub fn describe_validation_errors(body: &Value) -> String {
    match body {
        Value::Object(fields) => fields
            .iter()
            .filter_map(|(field, messages)| {
                let text = messages_text(messages)?;
                Some(match field.as_str() {
                    "detail" | "non_field_errors" => text,
                    _ => format!("{}: {}", field, text),
                })
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => messages_text(other).unwrap_or_default(),
    }
}

fn messages_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(message) => message.trim().to_string(),
        Value::Array(messages) => messages
            .iter()
            .filter_map(messages_text)
            .collect::<Vec<_>>()
            .join(" "),
        Value::Object(_) => describe_validation_errors(value),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}
