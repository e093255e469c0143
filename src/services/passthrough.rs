use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use reqwest::Client;

use crate::responses::text;

/// Largest request body relayed upstream.
const MAX_FORWARD_BODY: usize = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum PassthroughError {
    #[error("failed to read request body: {0}")]
    Body(String),
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

fn strip_hop_headers(headers: &mut HeaderMap) {
    for name in [
        header::HOST,
        header::CONNECTION,
        header::CONTENT_LENGTH,
        header::TRANSFER_ENCODING,
        header::UPGRADE,
    ] {
        headers.remove(name);
    }
}

/// Sends `request` unmodified to `upstream_base` and relays the answer.
pub async fn forward(
    client: &Client,
    upstream_base: &str,
    request: Request,
) -> Result<Response, PassthroughError> {
    let (parts, body) = request.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = format!("{}{}", upstream_base.trim_end_matches('/'), path_and_query);

    let body = axum::body::to_bytes(body, MAX_FORWARD_BODY)
        .await
        .map_err(|e| PassthroughError::Body(e.to_string()))?;

    let mut headers = parts.headers;
    strip_hop_headers(&mut headers);

    tracing::debug!(method = %parts.method, %url, "passing request through");
    let upstream = client
        .request(parts.method, &url)
        .headers(headers)
        .body(body)
        .send()
        .await?;

    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    strip_hop_headers(&mut headers);
    let bytes = upstream.bytes().await?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

/// [`forward`], answering `502 Bad Gateway` when the upstream is unreachable.
pub async fn forward_or_bad_gateway(
    client: &Client,
    upstream_base: &str,
    request: Request,
) -> Response {
    match forward(client, upstream_base, request).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(error = %err, upstream = %upstream_base, "passthrough failed");
            text(StatusCode::BAD_GATEWAY, "Bad Gateway")
        }
    }
}
