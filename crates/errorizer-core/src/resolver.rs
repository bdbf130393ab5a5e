use std::sync::Arc;

use http::StatusCode;
use serde_json::Value;

use crate::definition::{Definition, Field, Properties};
use crate::error::ResolutionError;
use crate::registry::ErrorRegistry;
use crate::response::ErrorResponse;
use crate::signal::ErrorInfo;
use crate::validation::{render, status_code, validate_candidate};

/// Evaluates registry definitions into validated responses
#[derive(Debug, Clone)]
pub struct ResponseResolver {
    registry: Arc<ErrorRegistry>,
}

impl ResponseResolver {
    pub const fn new(registry: Arc<ErrorRegistry>) -> Self {
        Self { registry }
    }

    /// Produce the response for `info`
    ///
    /// Templates have their computed fields evaluated against the signal's
    /// properties. Computing functions receive the whole info and their output
    /// must pass definition validation. Failures are returned, not recovered;
    /// fallback is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is not registered, a function fails, or a
    /// computed value is invalid
    pub fn resolve(&self, info: &ErrorInfo) -> Result<ErrorResponse, ResolutionError> {
        let code = info.code.as_str();

        let definition = self
            .registry
            .get(code)
            .ok_or_else(|| ResolutionError::UnknownCode { code: code.to_owned() })?;

        let computed;
        let template = match definition {
            Definition::Template(template) => template,
            Definition::Computed(compute) => {
                let candidate = compute.evaluate(code, info)?;
                computed = validate_candidate(code, Some(&candidate))?;
                &computed
            }
        };

        let empty = Properties::new();
        let properties = info.properties.as_ref().unwrap_or(&empty);

        let status = resolve_status(code, template.status.as_ref(), properties)?;
        let message = resolve_message(code, template.message.as_ref(), properties)?;
        let detail = template.detail.clone().filter(|detail| !detail.is_null());

        Ok(ErrorResponse {
            status,
            code: code.to_owned(),
            message,
            detail,
        })
    }
}

/// Absent status defaults to 500
fn resolve_status(code: &str, field: Option<&Field>, properties: &Properties) -> Result<StatusCode, ResolutionError> {
    let value = match field {
        Some(field) => field.evaluate(code, properties)?,
        None => Value::Null,
    };

    if value.is_null() {
        return Ok(StatusCode::INTERNAL_SERVER_ERROR);
    }

    status_code(&value).ok_or_else(|| ResolutionError::InvalidStatus {
        code: code.to_owned(),
        status: render(&value),
    })
}

/// Absent message is kept absent
fn resolve_message(
    code: &str,
    field: Option<&Field>,
    properties: &Properties,
) -> Result<Option<String>, ResolutionError> {
    let value = match field {
        Some(field) => field.evaluate(code, properties)?,
        None => return Ok(None),
    };

    match value {
        Value::Null => Ok(None),
        Value::String(message) if !message.is_empty() => Ok(Some(message)),
        other => Err(ResolutionError::InvalidMessage {
            code: code.to_owned(),
            message: render(&other),
        }),
    }
}
