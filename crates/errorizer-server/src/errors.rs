//! Error translation middleware for axum

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use errorizer_core::{ErrorBody, ErrorMiddleware, Handled, ResponseSink};
use http::StatusCode;

use crate::raised::Raised;

/// Install the error middleware on every route of `router`
pub fn with_error_translation(router: Router, middleware: ErrorMiddleware) -> Router {
    router.layer(axum::middleware::from_fn(move |req, next| {
        let middleware = middleware.clone();
        async move { error_middleware(middleware, req, next).await }
    }))
}

/// Translate errors raised by inner handlers into JSON error responses
///
/// Responses without a [`Raised`] extension pass through untouched. A
/// translated response carries the resolved
/// [`ErrorResponse`](errorizer_core::ErrorResponse) in its extensions; a
/// bypassed one keeps the original [`Raised`].
pub async fn error_middleware(middleware: ErrorMiddleware, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let head = parts.clone();

    let mut response = next.run(Request::from_parts(parts, body)).await;

    let Some(raised) = response.extensions_mut().remove::<Raised>() else {
        return response;
    };

    let committed = raised.is_committed();
    let mut sink = HostResponse {
        response: &mut response,
        committed,
    };

    match middleware.handle(raised, &head, &mut sink, |handled| handled) {
        Handled::Bypassed(raised) => {
            response.extensions_mut().insert(raised);
        }
        Handled::Translated(resolved) => {
            response.extensions_mut().insert(resolved);
        }
    }

    response
}

/// axum response seen through the host-agnostic sink
struct HostResponse<'a> {
    response: &'a mut Response,
    committed: bool,
}

impl ResponseSink for HostResponse<'_> {
    fn headers_sent(&self) -> bool {
        self.committed
    }

    fn send_json(&mut self, status: StatusCode, body: &ErrorBody<'_>) {
        let extensions = std::mem::take(self.response.extensions_mut());

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().extend(extensions);

        *self.response = response;
        self.committed = true;
    }
}
