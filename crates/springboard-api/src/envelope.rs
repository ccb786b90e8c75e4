//! Response envelope normalization.
//!
//! The backend speaks two envelope dialects: `{responseCode,
//! responseMessage, data}` and `{code, message, data}`, where `message`
//! may be a validation array. These helpers are pure so the gateway's
//! parsing rules stay unit-testable without a server.

use serde_json::Value;

/// Extract the server's error message from either envelope shape.
///
/// `responseMessage` wins; otherwise `message`, which may be an array
/// of validation messages joined with spaces.
pub(crate) fn extract_error_message(body: &Value) -> Option<String> {
    if let Some(msg) = body.get("responseMessage").and_then(Value::as_str) {
        return Some(msg.to_string());
    }

    match body.get("message") {
        Some(Value::String(msg)) => Some(msg.clone()),
        Some(Value::Array(parts)) => {
            let joined = parts
                .iter()
                .map(|p| match p {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(" ");
            Some(joined)
        }
        _ => None,
    }
}

/// Unwrap a `{data: T}` envelope if present, else return the raw body.
pub(crate) fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            // `data: null` means the envelope carried no payload
            match map.remove("data") {
                Some(Value::Null) | None => Value::Object(map),
                Some(data) => data,
            }
        }
        other => other,
    }
}

/// Whether a verify failure means "valid signature, unknown wallet".
pub(crate) fn indicates_missing_account(status: u16, message: &str) -> bool {
    status == 404 || message.contains("No account found")
}
