use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct JsonResponse {
    pub status: String,
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    fn build(status: StatusCode, msg: &str) -> impl IntoResponse {
        let success = status.is_success();
        (
            status,
            Json(JsonResponse {
                status: if success { "success" } else { "error" }.to_string(),
                success,
                message: msg.to_string(),
            }),
        )
    }

    pub fn success(msg: &str) -> impl IntoResponse {
        Self::build(StatusCode::OK, msg)
    }

    pub fn not_found(msg: &str) -> impl IntoResponse {
        Self::build(StatusCode::NOT_FOUND, msg)
    }

    pub fn bad_request(msg: &str) -> impl IntoResponse {
        Self::build(StatusCode::BAD_REQUEST, msg)
    }

    pub fn server_error(msg: &str) -> impl IntoResponse {
        Self::build(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }
}

/// Plain-text body with an explicit status, the way the provider APIs answer errors.
pub fn text(status: StatusCode, body: impl Into<String>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain;charset=UTF-8")],
        body.into(),
    )
        .into_response()
}

/// The "let the real request through" signal: `302 Passthrough`.
pub fn passthrough_signal() -> Response {
    text(StatusCode::FOUND, "Passthrough")
}
