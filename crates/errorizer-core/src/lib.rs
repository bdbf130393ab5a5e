//! Translates loosely-typed error signals into validated HTTP error responses
//!
//! Upstream code raises an [`ErrorSignal`]: a code, a native error, or a code
//! with parameters. The [`Translator`] resolves it against an immutable
//! [`ErrorRegistry`] and always produces exactly one [`ErrorResponse`],
//! falling back to the default `UNEXPECTED_ERROR` response whenever a code is
//! unknown or its definition fails to resolve.

mod definition;
mod error;
mod middleware;
mod registry;
mod resolver;
mod response;
mod signal;
mod translator;
pub mod validation;

pub use definition::{Compute, Definition, Definitions, ErrorTemplate, Field, Properties};
pub use error::{ResolutionError, ValidationError};
pub use middleware::{ErrorMiddleware, Handled, ResponseSink};
pub use registry::{DEFAULT_ERROR_CODE, DEFAULT_ERROR_MESSAGE, DEFAULT_ERROR_STATUS, ErrorRegistry, default_definition};
pub use resolver::ResponseResolver;
pub use response::{ErrorBody, ErrorResponse};
pub use signal::{ErrorInfo, ErrorSignal, SignalInterpreter};
pub use translator::Translator;
