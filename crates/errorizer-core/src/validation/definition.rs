use serde_json::Value;

use super::{is_blank, render, status_code};
use crate::definition::{ErrorTemplate, Field};
use crate::error::ValidationError;

/// Check a single template for `code`
///
/// Computed `status` and `message` fields are skipped; their output is
/// checked when the function runs.
///
/// # Errors
///
/// Returns the first violation found: missing or unrecognised status,
/// missing or non-string message, or a detail that is not a string, object
/// or array
pub fn validate_definition(code: &str, template: &ErrorTemplate) -> Result<(), ValidationError> {
    match &template.status {
        None => return Err(ValidationError::MissingStatus { code: code.to_owned() }),
        Some(Field::Static(status)) if is_blank(status) => {
            return Err(ValidationError::MissingStatus { code: code.to_owned() });
        }
        Some(Field::Static(status)) if status_code(status).is_none() => {
            return Err(ValidationError::InvalidStatus {
                code: code.to_owned(),
                status: render(status),
            });
        }
        Some(_) => {}
    }

    match &template.message {
        None => return Err(ValidationError::MissingMessage { code: code.to_owned() }),
        Some(Field::Static(message)) if is_blank(message) => {
            return Err(ValidationError::MissingMessage { code: code.to_owned() });
        }
        Some(Field::Static(message)) if !message.is_string() => {
            return Err(ValidationError::InvalidMessage {
                code: code.to_owned(),
                message: render(message),
            });
        }
        Some(_) => {}
    }

    match &template.detail {
        None | Some(Value::Null | Value::String(_) | Value::Array(_) | Value::Object(_)) => Ok(()),
        Some(detail) => Err(ValidationError::InvalidDetail {
            code: code.to_owned(),
            detail: render(detail),
        }),
    }
}

/// Check a loosely-typed candidate, typically the output of a computing function
///
/// # Errors
///
/// Returns an error if the candidate is absent, is not a mapping, or fails
/// [`validate_definition`]
pub fn validate_candidate(code: &str, candidate: Option<&Value>) -> Result<ErrorTemplate, ValidationError> {
    let fields = match candidate {
        None | Some(Value::Null) => {
            return Err(ValidationError::MissingDefinition { code: code.to_owned() });
        }
        Some(Value::Object(fields)) => fields,
        Some(other) => {
            return Err(ValidationError::NotMapping {
                code: code.to_owned(),
                found: render(other),
            });
        }
    };

    let template = ErrorTemplate::from_map(fields);
    validate_definition(code, &template)?;

    Ok(template)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn check(candidate: &Value) -> Result<ErrorTemplate, ValidationError> {
        validate_candidate("INVALID_REQUEST", Some(candidate))
    }

    #[test]
    fn accepts_well_formed_definitions() {
        check(&json!({ "status": 400, "message": "The request is invalid" })).unwrap();
        check(&json!({ "status": 400, "message": "m", "detail": "text" })).unwrap();
        check(&json!({ "status": 400, "message": "m", "detail": { "docs": "https://docs" } })).unwrap();
        check(&json!({ "status": 400, "message": "m", "detail": [1, 2] })).unwrap();
        check(&json!({ "status": 400, "message": "m", "detail": null })).unwrap();
    }

    #[test]
    fn rejects_absent_definition() {
        let err = validate_candidate("INVALID_REQUEST", None).unwrap_err();
        assert_eq!(err.to_string(), "no error definition for \"INVALID_REQUEST\"");

        let err = check(&Value::Null).unwrap_err();
        assert!(matches!(err, ValidationError::MissingDefinition { .. }));
    }

    #[test]
    fn rejects_non_mapping() {
        let err = check(&json!("oops")).unwrap_err();
        assert_eq!(err.to_string(), "\"INVALID_REQUEST\" error is not an object: \"oops\"");
    }

    #[test]
    fn rejects_missing_status() {
        let err = check(&json!({ "message": "m" })).unwrap_err();
        assert_eq!(err.to_string(), "missing status for error \"INVALID_REQUEST\"");

        let err = check(&json!({ "status": 0, "message": "m" })).unwrap_err();
        assert!(matches!(err, ValidationError::MissingStatus { .. }));
    }

    #[test]
    fn rejects_unknown_status() {
        let err = check(&json!({ "status": 999, "message": "m" })).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"INVALID_REQUEST\" status is not a valid HTTP status code: 999"
        );
    }

    #[test]
    fn rejects_missing_message() {
        let err = check(&json!({ "status": 400 })).unwrap_err();
        assert_eq!(err.to_string(), "missing message for error \"INVALID_REQUEST\"");

        let err = check(&json!({ "status": 400, "message": "" })).unwrap_err();
        assert!(matches!(err, ValidationError::MissingMessage { .. }));
    }

    #[test]
    fn rejects_non_string_message() {
        let err = check(&json!({ "status": 400, "message": ["m"] })).unwrap_err();
        assert_eq!(err.to_string(), "\"INVALID_REQUEST\" message is not a string: [\"m\"]");
    }

    #[test]
    fn rejects_scalar_detail() {
        let err = check(&json!({ "status": 400, "message": "m", "detail": 1024 })).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("INVALID_REQUEST"));
        assert!(message.contains("1024"));

        let err = check(&json!({ "status": 400, "message": "m", "detail": true })).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDetail { .. }));
    }

    #[test]
    fn skips_computed_fields() {
        let template = ErrorTemplate::new(
            Field::computed(|_| Ok(json!("not-a-number"))),
            Field::computed(|_| Ok(json!(12))),
        );

        validate_definition("COMPUTED", &template).unwrap();
    }
}
