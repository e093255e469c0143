use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use crate::{
    models::email::{OutboundEmail, SendEmailResponse},
    responses::JsonResponse,
    state::AppState,
};

/// POST /emails
///
/// A missing `Authorization` header answers 500.
pub async fn send_email(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !headers.contains_key(header::AUTHORIZATION) {
        tracing::error!("mocked email send is missing the Authorization header");
        return JsonResponse::server_error("Missing required header: Authorization")
            .into_response();
    }

    let email: OutboundEmail = match serde_json::from_slice(&body) {
        Ok(email) => email,
        Err(err) => {
            return JsonResponse::bad_request(&format!("Invalid email payload: {}", err))
                .into_response();
        }
    };
    tracing::info!(
        from = %email.from,
        to = ?email.to,
        subject = %email.subject,
        "🔶 mocked email contents"
    );

    let stored = match state.outbox.write_email(&email).await {
        Ok(stored) => stored,
        Err(err) => {
            tracing::error!(error = %err, "failed to write mocked email");
            return JsonResponse::server_error(&err.to_string()).into_response();
        }
    };

    Json(SendEmailResponse {
        id: Uuid::new_v4().to_string(),
        from: stored.from,
        to: stored.to,
        created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
    .into_response()
}
