use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};

use crate::responses::{passthrough_signal, JsonResponse};

/// Path of the dev server's ping endpoint: the origin's path plus `ping`.
pub fn ping_path(dev_origin: &str) -> String {
    let without_scheme = dev_origin
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(dev_origin);
    let base = without_scheme
        .find('/')
        .map(|idx| &without_scheme[idx..])
        .unwrap_or("/");

    if base.ends_with('/') {
        format!("{}ping", base)
    } else {
        format!("{}/ping", base)
    }
}

/// POST {dev_origin}ping
pub async fn dev_ping() -> Response {
    passthrough_signal()
}

/// Anything no handler claims: warn so missing mocks are noticed.
pub async fn unhandled(request: Request) -> Response {
    tracing::warn!(
        method = %request.method(),
        uri = %request.uri(),
        "unhandled request reached the mock server"
    );
    JsonResponse::not_found("No mock registered for this request").into_response()
}
