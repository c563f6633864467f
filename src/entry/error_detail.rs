//! Classification and unwrapping of caller-supplied error values.
//!
//! # Responsibilities
//! - Classify an error value once at the boundary into a tagged variant
//! - Unwrap it into at most one of three entry shapes:
//!   standard error fields, third-party trace fields, or truncated raw JSON
//!
//! # Design Decisions
//! - Exactly one shape populates the entry's error field
//! - Raw serialization is capped at 512 bytes; if it fails the detail is
//!   dropped silently (no logging about logging)

use serde::Serialize;
use serde_json::Value;

/// Maximum bytes of serialized detail kept for an opaque error value.
const RAW_ERROR_BUDGET: usize = 512;

/// A caller-supplied error, classified at the call boundary.
#[derive(Debug, Clone)]
pub enum ErrorValue {
    /// A proper error value: name, message, and rendered cause chain.
    Standard {
        name: String,
        message: String,
        stack: Option<String>,
    },
    /// Anything else, carried as JSON for shape sniffing.
    Raw(Value),
}

impl ErrorValue {
    /// Classify a standard error, capturing its concrete type name and
    /// cause chain.
    pub fn from_error<E: std::error::Error>(error: &E) -> Self {
        ErrorValue::Standard {
            name: std::any::type_name::<E>().to_string(),
            message: error.to_string(),
            stack: render_chain(error),
        }
    }
}

impl From<Value> for ErrorValue {
    fn from(value: Value) -> Self {
        ErrorValue::Raw(value)
    }
}

impl From<String> for ErrorValue {
    fn from(value: String) -> Self {
        ErrorValue::Raw(Value::String(value))
    }
}

impl From<&str> for ErrorValue {
    fn from(value: &str) -> Self {
        ErrorValue::Raw(Value::String(value.to_string()))
    }
}

/// Render the source chain of an error, one cause per line.
fn render_chain(error: &dyn std::error::Error) -> Option<String> {
    let mut rendered = String::new();
    let mut source = error.source();
    while let Some(cause) = source {
        if !rendered.is_empty() {
            rendered.push('\n');
        }
        rendered.push_str("caused by: ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    if rendered.is_empty() {
        None
    } else {
        Some(rendered)
    }
}

/// Structured error detail on an emitted entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<FacebookError>,
}

/// Field set extracted from a remote-API error carrying `fbtrace_id`.
/// Every value is coerced to a string for downstream consistency.
#[derive(Debug, Clone, Serialize)]
pub struct FacebookError {
    pub fbtrace_id: String,
    pub code: String,
    pub is_transient: String,
    pub error_subcode: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ErrorDetail {
    /// Unwrap a classified error value. Returns `None` when the detail
    /// cannot be represented (the entry then omits `error` entirely).
    pub fn from_value(value: ErrorValue) -> Option<ErrorDetail> {
        match value {
            ErrorValue::Standard {
                name,
                message,
                stack,
            } => Some(ErrorDetail {
                message: Some(message),
                name: Some(name),
                stack,
                ..Default::default()
            }),
            ErrorValue::Raw(value) => Self::from_raw(value),
        }
    }

    fn from_raw(value: Value) -> Option<ErrorDetail> {
        if let Some(object) = value.as_object() {
            if object.contains_key("fbtrace_id") {
                return Some(ErrorDetail {
                    facebook: Some(FacebookError {
                        fbtrace_id: coerce(object, "fbtrace_id"),
                        code: coerce(object, "code"),
                        is_transient: coerce(object, "is_transient"),
                        error_subcode: coerce(object, "error_subcode"),
                        message: coerce(object, "message"),
                        kind: coerce(object, "type"),
                    }),
                    ..Default::default()
                });
            }
        }
        // Could be anything: keep a truncated serialization, or nothing
        match serde_json::to_string(&value) {
            Ok(raw) => Some(ErrorDetail {
                raw: Some(truncate(raw)),
                ..Default::default()
            }),
            Err(_) => None,
        }
    }
}

/// String coercion for third-party error fields. Missing fields and
/// explicit nulls both coerce to the literal "null".
fn coerce(object: &serde_json::Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        None | Some(Value::Null) => "null".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn truncate(mut raw: String) -> String {
    if raw.len() <= RAW_ERROR_BUDGET {
        return raw;
    }
    let mut end = RAW_ERROR_BUDGET;
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    raw.truncate(end);
    raw
}
