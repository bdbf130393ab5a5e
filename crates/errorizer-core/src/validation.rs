//! Shape checks applied to error definitions
//!
//! The same rule set runs at setup over every static definition and at
//! resolution time over whatever a computing function returns.

mod definition;
mod registry;

use http::StatusCode;
use serde_json::Value;

pub use self::definition::{validate_candidate, validate_definition};
pub use self::registry::validate_registry;

/// Interpret a value as a recognised HTTP status code
///
/// Only integers with a canonical reason phrase qualify.
pub fn status_code(value: &Value) -> Option<StatusCode> {
    value
        .as_u64()
        .and_then(|n| u16::try_from(n).ok())
        .and_then(|n| StatusCode::from_u16(n).ok())
        .filter(|status| status.canonical_reason().is_some())
}

/// Whether a value counts as absent for a required field
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Render a value for an error message
pub(crate) fn render(value: &Value) -> String {
    value.to_string()
}
