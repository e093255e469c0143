//! Endpoints a test runner uses to seed and inspect fixtures out of process.

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::{responses::JsonResponse, state::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct SeedGitHubUser {
    pub code: Option<String>,
}

/// POST /__mocks/github/users
pub async fn insert_github_user(State(state): State<AppState>, body: Bytes) -> Response {
    let seed = if body.iter().all(u8::is_ascii_whitespace) {
        SeedGitHubUser::default()
    } else {
        match serde_json::from_slice::<SeedGitHubUser>(&body) {
            Ok(seed) => seed,
            Err(err) => {
                return JsonResponse::bad_request(&format!("Invalid seed payload: {}", err))
                    .into_response();
            }
        }
    };

    match state.github_users.upsert(seed.code.as_deref()).await {
        Ok(user) => Json(user).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to seed GitHub user");
            JsonResponse::server_error(&err.to_string()).into_response()
        }
    }
}

/// DELETE /__mocks/github/users
pub async fn delete_github_users(State(state): State<AppState>) -> Response {
    match state.github_users.reset().await {
        Ok(()) => JsonResponse::success("GitHub fixtures reset").into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to reset GitHub fixtures");
            JsonResponse::server_error(&err.to_string()).into_response()
        }
    }
}

/// GET /__mocks/emails/{recipient}
pub async fn read_email(
    State(state): State<AppState>,
    Path(recipient): Path<String>,
) -> Response {
    match state.outbox.read_email(&recipient).await {
        Ok(Some(email)) => Json(email).into_response(),
        Ok(None) => JsonResponse::not_found("No email for this recipient").into_response(),
        Err(err) => JsonResponse::server_error(&err.to_string()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;

    use crate::routes::test_support::{body_json, mocked_state, send};

    #[tokio::test]
    async fn seeding_twice_keeps_one_record() {
        let (state, _dir) = mocked_state();
        let seed = || {
            Request::post("/__mocks/github/users")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "code": "abc" }).to_string()))
                .unwrap()
        };

        let first = body_json(send(&state, seed()).await).await;
        let second = body_json(send(&state, seed()).await).await;

        assert_eq!(first["code"], "abc");
        assert_eq!(second["accessToken"], "abc_mock_access_token");
        assert_ne!(first["profile"]["id"], second["profile"]["id"]);
        assert_eq!(state.github_users.load().await.len(), 1);
    }

    #[tokio::test]
    async fn seeding_without_body_generates_code() {
        let (state, _dir) = mocked_state();
        let request = Request::post("/__mocks/github/users")
            .body(Body::empty())
            .unwrap();

        let response = send(&state, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let user = body_json(response).await;
        assert!(uuid::Uuid::parse_str(user["code"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn delete_resets_store() {
        let (state, _dir) = mocked_state();
        state.github_users.upsert(Some("abc")).await.unwrap();

        let request = Request::delete("/__mocks/github/users")
            .body(Body::empty())
            .unwrap();
        let response = send(&state, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.github_users.load().await.is_empty());
    }

    #[tokio::test]
    async fn reads_back_sent_email() {
        let (state, _dir) = mocked_state();
        let request = Request::get("/__mocks/emails/nobody@example.com")
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(&state, request).await.status(), StatusCode::NOT_FOUND);

        let email = Request::post("/emails")
            .header("authorization", "Bearer re_123")
            .body(Body::from(
                json!({
                    "from": "hello@example.com",
                    "to": ["kody@example.com"],
                    "subject": "Reset your password",
                    "text": "123456"
                })
                .to_string(),
            ))
            .unwrap();
        send(&state, email).await;

        let request = Request::get("/__mocks/emails/kody@example.com")
            .body(Body::empty())
            .unwrap();
        let response = send(&state, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["text"], "123456");
    }
}
