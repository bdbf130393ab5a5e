//! Demo routes raising every supported kind of error signal

use axum::Router;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use errorizer_core::{Definitions, ErrorSignal, ErrorTemplate, Field, Properties};
use errorizer_server::Raised;
use http::StatusCode;
use serde_json::{Value, json};

pub fn router() -> Router {
    Router::new()
        .route("/errors/string", get(string_error))
        .route("/errors/object", get(object_error))
        .route("/errors/params", get(params_error))
        .route("/errors/error", get(broken_definition))
        .route("/errors/unexpected", get(unexpected_error))
        .route("/errors/computed", get(computed_error))
        .route("/errors/configured", get(configured_error))
        .route("/errors/committed", get(committed_error))
}

/// Definitions registered in code
///
/// `ERROR_FROM_CONFIG` is intentionally absent; it comes from the `[errors]`
/// table of the config file when present.
pub fn definitions() -> Definitions {
    Definitions::new()
        .with(
            "ERROR_AS_STRING",
            ErrorTemplate::new(StatusCode::BAD_REQUEST, "This error was used as a string"),
        )
        .with(
            "ERROR_AS_OBJECT",
            ErrorTemplate::new(StatusCode::UNAUTHORIZED, "This error was used as an object"),
        )
        .with(
            "ERROR_WITH_PARAMS",
            ErrorTemplate::new(
                Field::computed(|p| Ok(property(p, "httpStatusCode"))),
                Field::computed(|p| Ok(property(p, "errorMessage"))),
            ),
        )
        .with(
            "ERROR_WITH_ERROR",
            ErrorTemplate::new(
                Field::computed(|_| Ok(json!("UGLY BUG!"))),
                "This error will cause an error",
            ),
        )
        .with_computed("ERROR_COMPUTED", |info| {
            let resource = info
                .properties
                .as_ref()
                .and_then(|p| p.get("resource"))
                .and_then(Value::as_str)
                .unwrap_or("resource");

            Ok(json!({
                "status": 404,
                "message": format!("The {resource} could not be found"),
                "detail": { "resource": resource },
            }))
        })
}

fn property(properties: &Properties, key: &str) -> Value {
    properties.get(key).cloned().unwrap_or(Value::Null)
}

async fn string_error() -> Result<&'static str, Raised> {
    Err("ERROR_AS_STRING".into())
}

async fn object_error() -> Result<&'static str, Raised> {
    Err(json!({ "code": "ERROR_AS_OBJECT" }).into())
}

async fn params_error() -> Result<&'static str, Raised> {
    let mut properties = Properties::new();
    properties.insert("httpStatusCode".to_owned(), json!(402));
    properties.insert(
        "errorMessage".to_owned(),
        json!("This error message is from the parameters"),
    );

    Err(ErrorSignal::with_properties("ERROR_WITH_PARAMS", properties).into())
}

async fn broken_definition() -> Result<&'static str, Raised> {
    Err("ERROR_WITH_ERROR".into())
}

async fn unexpected_error() -> Result<&'static str, Raised> {
    Err(anyhow::anyhow!("BOOM!").into())
}

async fn computed_error() -> Result<&'static str, Raised> {
    let payload = json!({ "code": "ERROR_COMPUTED", "properties": { "resource": "widget" } });
    Err(anyhow::anyhow!(payload.to_string()).into())
}

async fn configured_error() -> Result<&'static str, Raised> {
    Err("ERROR_FROM_CONFIG".into())
}

async fn committed_error() -> Response {
    Raised::committed(
        (StatusCode::OK, "response written before the error").into_response(),
        "ERROR_AS_STRING",
    )
}
