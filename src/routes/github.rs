use axum::{
    body::Bytes,
    extract::{Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{
    models::github_user::GitHubUser,
    responses::{passthrough_signal, text},
    services::{github::errors::GitHubMockError, passthrough::forward_or_bad_gateway},
    state::AppState,
};

/// `token_type` handed out by the simulated token exchange.
pub const MOCK_TOKEN_TYPE: &str = "__MOCK_TOKEN_TYPE__";

/// Credential after the scheme of `authorization: token <t>`. Any scheme is
/// looked up; only a missing header or an empty credential is unauthorized.
pub fn access_token_from(headers: &HeaderMap) -> Result<&str, GitHubMockError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(GitHubMockError::Unauthorized)?
        .to_str()
        .map_err(|_| GitHubMockError::MalformedCredential)?;
    let credential = value.split_once(' ').map_or(value, |(_, rest)| rest);
    if credential.is_empty() {
        return Err(GitHubMockError::Unauthorized);
    }
    Ok(credential)
}

async fn authorized_user(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<GitHubUser, GitHubMockError> {
    let token = access_token_from(headers)?;
    state
        .github_users
        .find_by_access_token(token)
        .await
        .ok_or(GitHubMockError::NotFound)
}

async fn forward_to_api(state: &AppState, request: Request) -> Response {
    forward_or_bad_gateway(&state.http_client, &state.config.github_api_base, request).await
}

async fn forward_to_web(state: &AppState, request: Request) -> Response {
    forward_or_bad_gateway(&state.http_client, &state.config.github_web_base, request).await
}

/// Failures the real API would answer with are mirrored; anything else lets
/// the request through.
async fn answer_error(state: &AppState, err: GitHubMockError, request: Request) -> Response {
    match err.status() {
        Some(status) => text(status, err.to_string()),
        None => {
            tracing::warn!(error = %err, path = %request.uri().path(), "falling back to passthrough");
            forward_to_api(state, request).await
        }
    }
}

/// First value of `key` in an `application/x-www-form-urlencoded` body.
pub fn form_value(body: &[u8], key: &str) -> Option<String> {
    serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)
        .ok()?
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|accept| accept.contains("application/json"))
        .unwrap_or(false)
}

/// POST /login/oauth/access_token
pub async fn exchange_code(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if state.passthrough_github() {
        return passthrough_signal();
    }

    let code = form_value(&body, "code");
    let user = match state.github_users.get_or_create(code.as_deref()).await {
        Ok(user) => user,
        Err(err) => {
            tracing::error!(error = %err, "failed to persist GitHub user for token exchange");
            return text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        }
    };
    tracing::debug!(code = %user.code, "issued mock GitHub access token");

    if wants_json(&headers) {
        return Json(json!({
            "access_token": user.access_token,
            "token_type": MOCK_TOKEN_TYPE,
        }))
        .into_response();
    }

    match serde_urlencoded::to_string(&[
        ("access_token", user.access_token.as_str()),
        ("token_type", MOCK_TOKEN_TYPE),
    ]) {
        Ok(payload) => (
            [(header::CONTENT_TYPE, "application/x-www-form-urlencoded")],
            payload,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to encode token payload");
            text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

/// GET /user/emails
pub async fn list_emails(State(state): State<AppState>, request: Request) -> Response {
    if state.passthrough_github() {
        return forward_to_api(&state, request).await;
    }

    let lookup = authorized_user(&state, request.headers()).await;
    match lookup {
        Ok(user) => Json(user.emails).into_response(),
        Err(err) => answer_error(&state, err, request).await,
    }
}

/// GET /user
pub async fn current_user(State(state): State<AppState>, request: Request) -> Response {
    if state.passthrough_github() {
        return forward_to_api(&state, request).await;
    }

    let lookup = authorized_user(&state, request.headers()).await;
    match lookup {
        Ok(user) => Json(user.profile).into_response(),
        Err(err) => answer_error(&state, err, request).await,
    }
}

/// GET /user/{id}
pub async fn user_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Request,
) -> Response {
    if state.passthrough_github() {
        return forward_to_api(&state, request).await;
    }

    match state.github_users.find_by_profile_id(&id).await {
        Some(user) => Json(user.profile).into_response(),
        None => text(StatusCode::NOT_FOUND, GitHubMockError::NotFound.to_string()),
    }
}

/// GET /ghost.png
pub async fn avatar(State(state): State<AppState>, request: Request) -> Response {
    if state.passthrough_github() {
        return forward_to_web(&state, request).await;
    }

    match tokio::fs::read(&state.config.avatar_path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/jpg")], bytes).into_response(),
        Err(err) => {
            tracing::warn!(
                error = %err,
                path = %state.config.avatar_path.display(),
                "avatar fixture unavailable"
            );
            text(StatusCode::NOT_FOUND, GitHubMockError::NotFound.to_string())
        }
    }
}
