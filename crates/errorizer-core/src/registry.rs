use http::StatusCode;
use indexmap::IndexMap;

use crate::definition::{Definition, Definitions, ErrorTemplate};
use crate::error::ValidationError;
use crate::validation::validate_registry;

/// Reserved code for the always-present fallback definition
pub const DEFAULT_ERROR_CODE: &str = "UNEXPECTED_ERROR";

/// Status of the default error
pub const DEFAULT_ERROR_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// Message of the default error
pub const DEFAULT_ERROR_MESSAGE: &str = "An unexpected error has occurred while fulfilling the request";

/// Template used for [`DEFAULT_ERROR_CODE`]
pub fn default_definition() -> ErrorTemplate {
    ErrorTemplate::new(DEFAULT_ERROR_STATUS, DEFAULT_ERROR_MESSAGE)
}

/// Validated, immutable mapping from error code to definition
///
/// Always contains [`DEFAULT_ERROR_CODE`].
#[derive(Debug, Clone)]
pub struct ErrorRegistry {
    definitions: IndexMap<String, Definition>,
}

impl ErrorRegistry {
    /// Validate a candidate and merge in the default definition
    ///
    /// A caller-supplied definition for [`DEFAULT_ERROR_CODE`] is replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if any code is empty or any template is malformed
    pub fn new(definitions: Definitions) -> Result<Self, ValidationError> {
        validate_registry(&definitions)?;

        let mut definitions = definitions.into_entries();

        if definitions.contains_key(DEFAULT_ERROR_CODE) {
            tracing::warn!(code = DEFAULT_ERROR_CODE, "replacing caller-supplied definition for the default error");
        }
        definitions.insert(DEFAULT_ERROR_CODE.to_owned(), Definition::Template(default_definition()));

        tracing::debug!(codes = definitions.len(), "error registry built");

        Ok(Self { definitions })
    }

    pub fn get(&self, code: &str) -> Option<&Definition> {
        self.definitions.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.definitions.contains_key(code)
    }

    /// Registered codes in insertion order, default last unless supplied earlier
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for ErrorRegistry {
    fn default() -> Self {
        let mut definitions = IndexMap::with_capacity(1);
        definitions.insert(DEFAULT_ERROR_CODE.to_owned(), Definition::Template(default_definition()));

        Self { definitions }
    }
}
