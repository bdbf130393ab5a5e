//! Host-agnostic error-handling entry point
//!
//! Mirrors the usual `(error, request, response, next)` error-handler shape.
//! The host framework supplies the response through [`ResponseSink`] and
//! decides what continuing the pipeline means through the `next` callback.

use std::borrow::Borrow;
use std::sync::Arc;

use http::StatusCode;
use serde_json::Value;

use crate::definition::Definitions;
use crate::error::ValidationError;
use crate::registry::ErrorRegistry;
use crate::response::{ErrorBody, ErrorResponse};
use crate::signal::ErrorSignal;
use crate::translator::Translator;

/// Response handle owned by the host framework
pub trait ResponseSink {
    /// Whether the response has already been committed to the client
    fn headers_sent(&self) -> bool;

    /// Set the status and write `body` as the JSON payload
    fn send_json(&mut self, status: StatusCode, body: &ErrorBody<'_>);
}

/// What the middleware did with an error, handed to `next`
#[derive(Debug)]
pub enum Handled<E> {
    /// The response was already sent; the original signal is forwarded untouched
    Bypassed(E),
    /// The signal was translated and written
    Translated(ErrorResponse),
}

/// Error-handling middleware built from a validated registry
#[derive(Debug, Clone)]
pub struct ErrorMiddleware {
    translator: Arc<Translator>,
}

impl ErrorMiddleware {
    /// Validate `definitions` and build the middleware
    ///
    /// `None` builds a middleware that only knows the default error.
    ///
    /// # Errors
    ///
    /// Returns an error if the definitions are malformed
    pub fn new(definitions: Option<Definitions>) -> Result<Self, ValidationError> {
        let registry = ErrorRegistry::new(definitions.unwrap_or_default())?;
        Ok(Self::from_registry(registry))
    }

    /// Build the middleware from raw JSON definitions
    ///
    /// # Errors
    ///
    /// Returns an error if the value is present but not a mapping, or if any
    /// definition is malformed
    pub fn from_value(definitions: Option<Value>) -> Result<Self, ValidationError> {
        Self::new(Some(Definitions::from_value(definitions)?))
    }

    pub fn from_registry(registry: ErrorRegistry) -> Self {
        Self {
            translator: Arc::new(Translator::new(registry)),
        }
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Handle one raised error
    ///
    /// The already-sent check runs before anything else. When the response is
    /// still open, the signal is translated and written, then `next` is
    /// invoked with the resolved response.
    pub fn handle<E, R, N, T>(&self, error: E, request: &http::request::Parts, response: &mut R, next: N) -> T
    where
        E: Borrow<ErrorSignal>,
        R: ResponseSink + ?Sized,
        N: FnOnce(Handled<E>) -> T,
    {
        if response.headers_sent() {
            tracing::debug!(
                method = %request.method,
                uri = %request.uri,
                "response already sent, forwarding error"
            );
            return next(Handled::Bypassed(error));
        }

        let resolved = self.translator.translate(error.borrow());

        tracing::debug!(
            method = %request.method,
            uri = %request.uri,
            code = %resolved.code,
            status = resolved.status.as_u16(),
            "error translated"
        );

        response.send_json(resolved.status, &resolved.body());

        next(Handled::Translated(resolved))
    }
}
