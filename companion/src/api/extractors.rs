use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use crate::error::CompanionError;

/// `Json` extractor whose rejections use the service's `{"detail": ...}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(CompanionError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for CompanionError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> CompanionError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            if let Some(field) = extract_missing_field(&message) {
                CompanionError::Validation(format!("Missing required field: {field}"))
            } else {
                CompanionError::Validation(format!("Invalid JSON: {message}"))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            CompanionError::Validation(format!("JSON syntax error: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => CompanionError::Validation(
            "Missing `Content-Type: application/json` header".to_string(),
        ),
        JsonRejection::BytesRejection(_) => {
            CompanionError::Internal("Failed to read request body".to_string())
        }
        _ => CompanionError::Validation(rejection.body_text()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}
