use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::definition::Properties;
use crate::registry::{DEFAULT_ERROR_CODE, ErrorRegistry};

/// Raw error raised by upstream code
///
/// Upstream code is free to raise whatever is convenient; the interpreter
/// decides what it means.
#[derive(Debug)]
pub enum ErrorSignal {
    /// A bare error code
    Code(String),
    /// A native error whose message is either a code or a JSON-encoded
    /// `{ "code": .., .. }` object
    Error(anyhow::Error),
    /// An explicit code with optional parameters
    Structured { code: String, properties: Option<Properties> },
    /// Any loosely-typed value; strings and `{ code, properties }` objects are
    /// understood, everything else is unclassifiable
    Value(Value),
}

impl ErrorSignal {
    pub fn code(code: impl Into<String>) -> Self {
        Self::Code(code.into())
    }

    pub fn with_properties(code: impl Into<String>, properties: Properties) -> Self {
        Self::Structured {
            code: code.into(),
            properties: Some(properties),
        }
    }
}

impl From<&str> for ErrorSignal {
    fn from(code: &str) -> Self {
        Self::Code(code.to_owned())
    }
}

impl From<String> for ErrorSignal {
    fn from(code: String) -> Self {
        Self::Code(code)
    }
}

impl From<anyhow::Error> for ErrorSignal {
    fn from(error: anyhow::Error) -> Self {
        Self::Error(error)
    }
}

impl From<Value> for ErrorSignal {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<ErrorInfo> for ErrorSignal {
    fn from(info: ErrorInfo) -> Self {
        Self::Structured {
            code: info.code,
            properties: info.properties,
        }
    }
}

/// Normalized error: a code known to the registry plus its parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

impl ErrorInfo {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            properties: None,
        }
    }

    /// Info pointing at the default error
    pub fn default_error() -> Self {
        Self::new(DEFAULT_ERROR_CODE)
    }

    #[must_use]
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = Some(properties);
        self
    }
}

/// Classifies error signals against a registry
#[derive(Debug, Clone)]
pub struct SignalInterpreter {
    registry: Arc<ErrorRegistry>,
}

impl SignalInterpreter {
    pub const fn new(registry: Arc<ErrorRegistry>) -> Self {
        Self { registry }
    }

    /// Normalize a signal into a code present in the registry
    ///
    /// Unclassifiable signals and unknown codes both resolve to the default
    /// error code, so the result always has a registry entry.
    pub fn interpret(&self, signal: &ErrorSignal) -> ErrorInfo {
        let Some(info) = classify(signal) else {
            tracing::debug!("unclassifiable error signal, using default error");
            return ErrorInfo::default_error();
        };

        if self.registry.contains(&info.code) {
            info
        } else {
            tracing::debug!(code = %info.code, "unknown error code, using default error");
            ErrorInfo::default_error()
        }
    }
}

fn classify(signal: &ErrorSignal) -> Option<ErrorInfo> {
    match signal {
        ErrorSignal::Code(code) => Some(ErrorInfo::new(code.clone())),
        ErrorSignal::Error(error) => Some(from_payload(error.to_string())),
        ErrorSignal::Structured { code, properties } => Some(ErrorInfo {
            code: code.clone(),
            properties: properties.clone(),
        }),
        ErrorSignal::Value(value) => from_value(value),
    }
}

/// Interpret the message carried by a native error
///
/// A JSON object with a string `code` contributes that code and either its
/// `properties` object or its remaining fields. Any other payload is the code.
fn from_payload(payload: String) -> ErrorInfo {
    let Ok(Value::Object(mut fields)) = serde_json::from_str::<Value>(&payload) else {
        return ErrorInfo::new(payload);
    };

    let Some(Value::String(code)) = fields.remove("code") else {
        return ErrorInfo::new(payload);
    };

    let properties = match fields.remove("properties") {
        Some(Value::Object(properties)) => Some(properties),
        Some(other) => {
            fields.insert("properties".to_owned(), other);
            Some(fields)
        }
        None if fields.is_empty() => None,
        None => Some(fields),
    };

    ErrorInfo { code, properties }
}

fn from_value(value: &Value) -> Option<ErrorInfo> {
    match value {
        Value::String(code) => Some(ErrorInfo::new(code.clone())),
        Value::Object(fields) => {
            let code = fields.get("code")?.as_str()?;
            let properties = fields.get("properties").and_then(Value::as_object).cloned();

            Some(ErrorInfo {
                code: code.to_owned(),
                properties,
            })
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) => None,
    }
}
