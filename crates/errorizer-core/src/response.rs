use http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::registry::{DEFAULT_ERROR_CODE, DEFAULT_ERROR_MESSAGE, DEFAULT_ERROR_STATUS};

/// Fully resolved and validated error response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: StatusCode,
    pub code: String,
    /// `None` when a computed message was legitimately absent
    pub message: Option<String>,
    pub detail: Option<Value>,
}

impl ErrorResponse {
    /// The fixed default error response
    pub fn default_error() -> Self {
        Self {
            status: DEFAULT_ERROR_STATUS,
            code: DEFAULT_ERROR_CODE.to_owned(),
            message: Some(DEFAULT_ERROR_MESSAGE.to_owned()),
            detail: None,
        }
    }

    pub fn is_default_error(&self) -> bool {
        self.code == DEFAULT_ERROR_CODE
    }

    /// JSON body written to the client
    pub fn body(&self) -> ErrorBody<'_> {
        ErrorBody {
            status: self.status.canonical_reason().unwrap_or_default(),
            code: &self.code,
            message: self.message.as_deref(),
            detail: self.detail.as_ref(),
        }
    }
}

/// Wire form of an [`ErrorResponse`]
///
/// `status` carries the reason phrase; the numeric status goes on the status
/// line. Absent `message` and `detail` are omitted rather than sent as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorBody<'a> {
    pub status: &'a str,
    pub code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<&'a Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn body_uses_reason_phrase() {
        let response = ErrorResponse {
            status: StatusCode::PAYMENT_REQUIRED,
            code: "PAY_UP".to_owned(),
            message: Some("Payment required".to_owned()),
            detail: Some(json!({ "amount": 3 })),
        };

        let body = serde_json::to_value(response.body()).unwrap();
        assert_eq!(
            body,
            json!({
                "status": "Payment Required",
                "code": "PAY_UP",
                "message": "Payment required",
                "detail": { "amount": 3 },
            })
        );
    }

    #[test]
    fn absent_fields_are_omitted() {
        let response = ErrorResponse {
            status: StatusCode::CONFLICT,
            code: "CONFLICT".to_owned(),
            message: None,
            detail: None,
        };

        let body = serde_json::to_value(response.body()).unwrap();
        assert_eq!(body, json!({ "status": "Conflict", "code": "CONFLICT" }));
    }

    #[test]
    fn default_error_body() {
        let body = serde_json::to_value(ErrorResponse::default_error().body()).unwrap();
        assert_eq!(
            body,
            json!({
                "status": "Internal Server Error",
                "code": "UNEXPECTED_ERROR",
                "message": "An unexpected error has occurred while fulfilling the request",
            })
        );
    }
}
