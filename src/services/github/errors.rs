// services/github/errors.rs
use axum::http::StatusCode;

/// Failures a simulated GitHub endpoint can answer with.
#[derive(Debug, thiserror::Error)]
pub enum GitHubMockError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Not Found")]
    NotFound,
    #[error("authorization header is not valid text")]
    MalformedCredential,
}

impl GitHubMockError {
    /// Status the real API uses for this failure, if it maps to one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GitHubMockError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            GitHubMockError::NotFound => Some(StatusCode::NOT_FOUND),
            GitHubMockError::MalformedCredential => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_credential_failures_to_http_status() {
        assert_eq!(
            GitHubMockError::Unauthorized.status(),
            Some(StatusCode::UNAUTHORIZED)
        );
        assert_eq!(
            GitHubMockError::NotFound.status(),
            Some(StatusCode::NOT_FOUND)
        );
        assert_eq!(GitHubMockError::NotFound.to_string(), "Not Found");
    }

    #[test]
    fn malformed_credentials_have_no_status() {
        assert!(GitHubMockError::MalformedCredential.status().is_none());
    }
}
