//! Routes raising each kind of error signal

use axum::Router;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use errorizer_core::{Definitions, ErrorSignal, ErrorTemplate, Field};
use errorizer_server::Raised;
use http::StatusCode;
use serde_json::{Value, json};

pub fn router() -> Router {
    Router::new()
        .route("/ok", get(|| async { "fine" }))
        .route("/errors/string", get(|| async { fail("ERROR_AS_STRING") }))
        .route(
            "/errors/object",
            get(|| async { fail(json!({ "code": "ERROR_AS_OBJECT" })) }),
        )
        .route(
            "/errors/params",
            get(|| async {
                fail(json!({
                    "code": "ERROR_WITH_PARAMS",
                    "properties": {
                        "httpStatusCode": 402,
                        "errorMessage": "This error message is from the parameters",
                    },
                }))
            }),
        )
        .route("/errors/error", get(|| async { fail("ERROR_WITH_ERROR") }))
        .route(
            "/errors/unexpected",
            get(|| async { fail(anyhow::anyhow!("BOOM!")) }),
        )
        .route("/errors/number", get(|| async { fail(json!(42)) }))
        .route("/errors/detail", get(|| async { fail("ERROR_WITH_DETAIL") }))
        .route("/errors/no-message", get(|| async { fail("ERROR_WITHOUT_MESSAGE") }))
        .route(
            "/errors/encoded",
            get(|| async {
                let payload = json!({ "code": "ERROR_WITH_PARAMS", "httpStatusCode": 429, "errorMessage": "Slow down" });
                fail(anyhow::anyhow!(payload.to_string()))
            }),
        )
        .route(
            "/errors/committed",
            get(|| async {
                Raised::committed((StatusCode::OK, "already written").into_response(), "ERROR_AS_STRING")
            }),
        )
}

pub fn definitions() -> Definitions {
    Definitions::new()
        .with("ERROR_AS_STRING", ErrorTemplate::new(400_u16, "This error was used as a string"))
        .with("ERROR_AS_OBJECT", ErrorTemplate::new(401_u16, "This error was used as an object"))
        .with(
            "ERROR_WITH_PARAMS",
            ErrorTemplate::new(
                Field::computed(|p| Ok(p.get("httpStatusCode").cloned().unwrap_or(Value::Null))),
                Field::computed(|p| Ok(p.get("errorMessage").cloned().unwrap_or(Value::Null))),
            ),
        )
        .with(
            "ERROR_WITH_ERROR",
            ErrorTemplate::new(Field::computed(|_| Ok(json!("UGLY BUG!"))), "This error will cause an error"),
        )
        .with(
            "ERROR_WITH_DETAIL",
            ErrorTemplate::new(422_u16, "The entity could not be processed")
                .with_detail(json!({ "fields": ["name", "email"] })),
        )
        .with(
            "ERROR_WITHOUT_MESSAGE",
            ErrorTemplate::new(409_u16, Field::computed(|_| Ok(Value::Null))),
        )
}

fn fail(signal: impl Into<ErrorSignal>) -> Response {
    Raised::new(signal).into_response()
}
