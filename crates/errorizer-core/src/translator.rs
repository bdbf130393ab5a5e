use std::sync::Arc;

use crate::registry::ErrorRegistry;
use crate::resolver::ResponseResolver;
use crate::response::ErrorResponse;
use crate::signal::{ErrorInfo, ErrorSignal, SignalInterpreter};

/// Turns any error signal into exactly one response
///
/// A failure while resolving a code degrades that response to the default
/// error; it never reaches the caller.
#[derive(Debug, Clone)]
pub struct Translator {
    interpreter: SignalInterpreter,
    resolver: ResponseResolver,
}

impl Translator {
    pub fn new(registry: ErrorRegistry) -> Self {
        let registry = Arc::new(registry);

        Self {
            interpreter: SignalInterpreter::new(Arc::clone(&registry)),
            resolver: ResponseResolver::new(registry),
        }
    }

    pub fn translate(&self, signal: &ErrorSignal) -> ErrorResponse {
        let info = self.interpreter.interpret(signal);

        match self.resolver.resolve(&info) {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(code = error.code(), %error, "error resolution failed, using default error");
                self.default_response()
            }
        }
    }

    fn default_response(&self) -> ErrorResponse {
        self.resolver
            .resolve(&ErrorInfo::default_error())
            .unwrap_or_else(|error| {
                tracing::error!(%error, "default error failed to resolve");
                ErrorResponse::default_error()
            })
    }
}
