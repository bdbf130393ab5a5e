//! Error definitions as supplied by the registry owner
//!
//! A definition is either a template whose `status` and `message` may each be
//! a fixed value or a function of the signal's properties, or a single
//! computing function that produces the whole definition from the
//! [`ErrorInfo`]. Both kinds of function share [`Compute`] and are evaluated
//! the same way.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use http::StatusCode;
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ResolutionError, ValidationError};
use crate::signal::ErrorInfo;
use crate::validation::render;

/// Parameters carried by an error signal
pub type Properties = serde_json::Map<String, Value>;

type ComputeFn<I> = dyn Fn(&I) -> anyhow::Result<Value> + Send + Sync;

/// Function supplied by the registry owner, evaluated at resolution time
///
/// The output is loosely typed and is validated by the caller, so a function
/// returning nonsense degrades to the default error instead of failing the
/// request.
pub struct Compute<I>(Arc<ComputeFn<I>>);

impl<I> Compute<I> {
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&I) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(function))
    }

    /// Run the function, converting errors and panics into [`ResolutionError::ComputeFailed`]
    pub(crate) fn evaluate(&self, code: &str, input: &I) -> Result<Value, ResolutionError> {
        let outcome = catch_unwind(AssertUnwindSafe(|| (self.0)(input)));

        let message = match outcome {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(error)) => error.to_string(),
            Err(panic) => panic
                .downcast_ref::<&str>()
                .map(|s| (*s).to_owned())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "function panicked".to_owned()),
        };

        Err(ResolutionError::ComputeFailed {
            code: code.to_owned(),
            message,
        })
    }
}

impl<I> Clone for Compute<I> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<I> fmt::Debug for Compute<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Compute(..)")
    }
}

/// A `status` or `message` slot of a template
#[derive(Debug, Clone)]
pub enum Field {
    Static(Value),
    Computed(Compute<Properties>),
}

impl Field {
    /// Field computed from the signal's properties
    pub fn computed<F>(function: F) -> Self
    where
        F: Fn(&Properties) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self::Computed(Compute::new(function))
    }

    pub(crate) fn evaluate(&self, code: &str, properties: &Properties) -> Result<Value, ResolutionError> {
        match self {
            Self::Static(value) => Ok(value.clone()),
            Self::Computed(compute) => compute.evaluate(code, properties),
        }
    }

    /// Static value, if the field is not computed
    pub const fn as_static(&self) -> Option<&Value> {
        match self {
            Self::Static(value) => Some(value),
            Self::Computed(_) => None,
        }
    }
}

impl From<StatusCode> for Field {
    fn from(status: StatusCode) -> Self {
        Self::Static(Value::from(status.as_u16()))
    }
}

impl From<u16> for Field {
    fn from(status: u16) -> Self {
        Self::Static(Value::from(status))
    }
}

impl From<&str> for Field {
    fn from(message: &str) -> Self {
        Self::Static(Value::from(message))
    }
}

impl From<String> for Field {
    fn from(message: String) -> Self {
        Self::Static(Value::from(message))
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        Self::Static(value)
    }
}

/// Status, message and optional detail for one error code
#[derive(Debug, Clone, Default)]
pub struct ErrorTemplate {
    pub status: Option<Field>,
    pub message: Option<Field>,
    pub detail: Option<Value>,
}

impl ErrorTemplate {
    pub fn new(status: impl Into<Field>, message: impl Into<Field>) -> Self {
        Self {
            status: Some(status.into()),
            message: Some(message.into()),
            detail: None,
        }
    }

    /// Attach structured detail returned verbatim in responses
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<Value>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Read a template out of a loosely-typed mapping
    ///
    /// Unknown keys are ignored; nothing is validated here.
    pub(crate) fn from_map(map: &Properties) -> Self {
        Self {
            status: map.get("status").cloned().map(Field::Static),
            message: map.get("message").cloned().map(Field::Static),
            detail: map.get("detail").cloned(),
        }
    }
}

/// Registry entry: a template, or a function producing the whole definition
#[derive(Debug, Clone)]
pub enum Definition {
    Template(ErrorTemplate),
    Computed(Compute<ErrorInfo>),
}

impl Definition {
    /// Definition computed from the full error info on every resolution
    ///
    /// The returned value must be a mapping that passes the same validation
    /// as a static definition.
    pub fn computed<F>(function: F) -> Self
    where
        F: Fn(&ErrorInfo) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self::Computed(Compute::new(function))
    }
}

impl From<ErrorTemplate> for Definition {
    fn from(template: ErrorTemplate) -> Self {
        Self::Template(template)
    }
}

/// Caller-supplied registry candidate, in insertion order
///
/// Turned into an [`ErrorRegistry`](crate::ErrorRegistry) once validated.
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    entries: IndexMap<String, Definition>,
}

impl Definitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the definition for `code`
    #[must_use]
    pub fn with(mut self, code: impl Into<String>, definition: impl Into<Definition>) -> Self {
        self.insert(code, definition);
        self
    }

    /// Add or replace a definition computed by `function`
    #[must_use]
    pub fn with_computed<F>(self, code: impl Into<String>, function: F) -> Self
    where
        F: Fn(&ErrorInfo) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.with(code, Definition::computed(function))
    }

    pub fn insert(&mut self, code: impl Into<String>, definition: impl Into<Definition>) {
        self.entries.insert(code.into(), definition.into());
    }

    /// Merge every entry of `other`, replacing existing codes
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Build a candidate from raw JSON (or TOML converted to JSON)
    ///
    /// `None` and `null` yield an empty candidate. Only the shape is checked
    /// here; field contents are left to [`validation::validate_registry`](crate::validation::validate_registry).
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an object, or if any entry is not
    /// an object
    pub fn from_value(value: Option<Value>) -> Result<Self, ValidationError> {
        let map = match value {
            None | Some(Value::Null) => return Ok(Self::default()),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(ValidationError::RegistryNotMapping { found: render(&other) });
            }
        };

        let mut entries = IndexMap::with_capacity(map.len());

        for (code, entry) in map {
            let Value::Object(ref fields) = entry else {
                return Err(ValidationError::InvalidEntry {
                    found: render(&entry),
                    code,
                });
            };

            let template = ErrorTemplate::from_map(fields);
            entries.insert(code, Definition::Template(template));
        }

        Ok(Self { entries })
    }

    pub fn get(&self, code: &str) -> Option<&Definition> {
        self.entries.get(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Definition)> {
        self.entries.iter().map(|(code, definition)| (code.as_str(), definition))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> IndexMap<String, Definition> {
        self.entries
    }
}

impl<C, D> FromIterator<(C, D)> for Definitions
where
    C: Into<String>,
    D: Into<Definition>,
{
    fn from_iter<T: IntoIterator<Item = (C, D)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(code, definition)| (code.into(), definition.into())).collect(),
        }
    }
}
