use std::borrow::Borrow;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use errorizer_core::ErrorSignal;
use http::StatusCode;
use serde_json::Value;

/// An error signal raised by a handler, carried in response extensions
///
/// Handlers return `Err(Raised)`; the error middleware picks it up and
/// replaces the placeholder response with the translated one. Without the
/// middleware installed the client sees a bare 500.
#[derive(Debug, Clone)]
pub struct Raised {
    signal: Arc<ErrorSignal>,
    committed: bool,
}

impl Raised {
    pub fn new(signal: impl Into<ErrorSignal>) -> Self {
        Self {
            signal: Arc::new(signal.into()),
            committed: false,
        }
    }

    /// Report an error alongside a response the handler already produced
    ///
    /// The response counts as sent: the middleware leaves it untouched and
    /// forwards the signal to outer layers in the response extensions.
    pub fn committed(mut response: Response, signal: impl Into<ErrorSignal>) -> Response {
        let raised = Self {
            signal: Arc::new(signal.into()),
            committed: true,
        };
        response.extensions_mut().insert(raised);
        response
    }

    pub fn signal(&self) -> &ErrorSignal {
        &self.signal
    }

    pub const fn is_committed(&self) -> bool {
        self.committed
    }
}

impl Borrow<ErrorSignal> for Raised {
    fn borrow(&self) -> &ErrorSignal {
        &self.signal
    }
}

impl IntoResponse for Raised {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

impl From<ErrorSignal> for Raised {
    fn from(signal: ErrorSignal) -> Self {
        Self::new(signal)
    }
}

impl From<anyhow::Error> for Raised {
    fn from(error: anyhow::Error) -> Self {
        Self::new(error)
    }
}

impl From<&str> for Raised {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for Raised {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<Value> for Raised {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
