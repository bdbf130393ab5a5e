use super::validate_definition;
use crate::definition::{Definition, Definitions};
use crate::error::ValidationError;

/// Check every entry of a registry candidate
///
/// Computing functions are accepted as-is; their output is validated each
/// time they run. Validation has no side effects, so running it repeatedly
/// over the same candidate gives the same result.
///
/// # Errors
///
/// Returns the first violation: an empty code, or a template failing
/// [`validate_definition`]
pub fn validate_registry(definitions: &Definitions) -> Result<(), ValidationError> {
    for (code, definition) in definitions.iter() {
        if code.is_empty() {
            return Err(ValidationError::EmptyCode);
        }

        match definition {
            Definition::Template(template) => validate_definition(code, template)?,
            Definition::Computed(_) => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::definition::ErrorTemplate;

    fn definitions() -> Definitions {
        Definitions::new()
            .with(
                "INVALID_REQUEST",
                ErrorTemplate::new(StatusCode::BAD_REQUEST, "The request is invalid").with_detail(json!({
                    "description": "This error occurs when the request is invalid",
                    "docs": "https://docs.myapp.com/errors/INVALID_REQUEST",
                })),
            )
            .with_computed("COMPUTED", |info| Ok(json!({ "status": 409, "message": info.code })))
    }

    #[test]
    fn validation_is_repeatable() {
        let definitions = definitions();

        validate_registry(&definitions).unwrap();
        validate_registry(&definitions).unwrap();
    }

    #[test]
    fn empty_code_is_rejected() {
        let definitions = definitions().with("", ErrorTemplate::new(400_u16, "m"));

        let err = validate_registry(&definitions).unwrap_err();
        assert_eq!(err, ValidationError::EmptyCode);
        assert!(err.to_string().contains("empty string"));
    }

    #[test]
    fn invalid_template_names_the_code() {
        let definitions = definitions().with("BROKEN", ErrorTemplate::new(400_u16, "m").with_detail(1024));

        let err = validate_registry(&definitions).unwrap_err();
        assert_eq!(err.code(), Some("BROKEN"));
        assert_eq!(err.to_string(), "\"BROKEN\" detail is not a string, object or array: 1024");
    }

    #[test]
    fn raw_registry_is_validated() {
        let definitions = Definitions::from_value(Some(json!({
            "INVALID_REQUEST": { "status": 400, "message": "The request is invalid" },
            "NO_STATUS": { "message": "m" },
        })))
        .unwrap();

        let err = validate_registry(&definitions).unwrap_err();
        assert_eq!(err, ValidationError::MissingStatus { code: "NO_STATUS".to_owned() });
    }
}
