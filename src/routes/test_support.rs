use axum::{
    body::{Body, Bytes},
    http::Request,
    response::Response,
};
use tempfile::TempDir;
use tower::ServiceExt; // for `.oneshot()`

use crate::{config::Config, server::build_router, state::AppState};

/// Fully mocked state backed by a fresh fixtures directory. Keep the
/// `TempDir` alive for the duration of the test.
pub fn mocked_state() -> (AppState, TempDir) {
    let dir = TempDir::new().unwrap();
    let state = AppState::from_config(Config::mocked(dir.path()));
    (state, dir)
}

pub async fn send(state: &AppState, request: Request<Body>) -> Response {
    build_router(state.clone()).oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Bytes {
    axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
