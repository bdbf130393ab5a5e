use thiserror::Error;

/// Configuration errors raised while validating error definitions
///
/// These are fatal at setup time: a registry that fails validation never
/// produces a middleware instance. The same variants are reused when a
/// computing function returns a malformed definition at resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The registry candidate was not a structured mapping
    #[error("error definitions are not an object: {found}")]
    RegistryNotMapping {
        /// Rendered form of the offending value
        found: String,
    },

    /// A registry key was the empty string
    #[error("empty string is not a valid error code")]
    EmptyCode,

    /// A registry entry was neither a mapping nor a computing function
    #[error("\"{code}\" is not an object or a function: {found}")]
    InvalidEntry { code: String, found: String },

    /// No definition was available for the code
    #[error("no error definition for \"{code}\"")]
    MissingDefinition { code: String },

    /// The definition was present but not a structured mapping
    #[error("\"{code}\" error is not an object: {found}")]
    NotMapping { code: String, found: String },

    #[error("missing status for error \"{code}\"")]
    MissingStatus { code: String },

    #[error("\"{code}\" status is not a valid HTTP status code: {status}")]
    InvalidStatus { code: String, status: String },

    #[error("missing message for error \"{code}\"")]
    MissingMessage { code: String },

    #[error("\"{code}\" message is not a string: {message}")]
    InvalidMessage { code: String, message: String },

    #[error("\"{code}\" detail is not a string, object or array: {detail}")]
    InvalidDetail { code: String, detail: String },
}

/// Failures while turning an [`ErrorInfo`](crate::ErrorInfo) into a response
///
/// Never surfaced to callers of the translator; each one downgrades the
/// response to the default error.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The code has no entry in the registry
    #[error("no error definition registered for \"{code}\"")]
    UnknownCode { code: String },

    /// A field-level or definition-level computing function failed
    #[error("{code} function threw an error: {message}")]
    ComputeFailed { code: String, message: String },

    /// A computed status is not a recognised HTTP status code
    #[error("invalid HTTP status code {status} for error \"{code}\"")]
    InvalidStatus { code: String, status: String },

    /// A computed message is not a non-empty string
    #[error("invalid error message {message} for error \"{code}\": it must be a string")]
    InvalidMessage { code: String, message: String },

    /// A computing function produced a definition that failed validation
    #[error(transparent)]
    InvalidDefinition(#[from] ValidationError),
}

impl ResolutionError {
    /// Error code the failure is attributed to
    pub fn code(&self) -> &str {
        match self {
            Self::UnknownCode { code }
            | Self::ComputeFailed { code, .. }
            | Self::InvalidStatus { code, .. }
            | Self::InvalidMessage { code, .. } => code,
            Self::InvalidDefinition(error) => error.code().unwrap_or_default(),
        }
    }
}

impl ValidationError {
    /// Error code the violation is attributed to, if it concerns a single entry
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::RegistryNotMapping { .. } | Self::EmptyCode => None,
            Self::InvalidEntry { code, .. }
            | Self::MissingDefinition { code }
            | Self::NotMapping { code, .. }
            | Self::MissingStatus { code }
            | Self::InvalidStatus { code, .. }
            | Self::MissingMessage { code }
            | Self::InvalidMessage { code, .. }
            | Self::InvalidDetail { code, .. } => Some(code),
        }
    }
}
