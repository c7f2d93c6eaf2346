//! Error-to-response mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use petpal_core::{ErrorResponse, PetpalError};
use tracing::{error, warn};

/// Application error type for Axum.
///
/// The full error is logged here; clients only ever see the redacted
/// [`ErrorResponse`].
#[derive(Debug)]
pub struct AppError(pub PetpalError);

impl From<PetpalError> for AppError {
    fn from(err: PetpalError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_upstream_failure() {
            warn!(error = %self.0, code = self.0.error_code(), "Upstream fetch failed");
        } else if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        (status, Json(ErrorResponse::from_error(&self.0))).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<T>, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: PetpalError) -> (StatusCode, ErrorResponse) {
        let response = AppError(err).into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_upstream_failures_are_redacted() {
        for err in [
            PetpalError::transport("dns error: no such host reddit.internal"),
            PetpalError::upstream_status(503, "Service Unavailable"),
            PetpalError::malformed_payload("expected value at line 1 column 1"),
        ] {
            let (status, body) = render(err).await;
            assert_eq!(status, StatusCode::BAD_GATEWAY);
            assert_eq!(body.code, "UPSTREAM_FETCH_FAILED");
            assert_eq!(body.message, "Failed to fetch Reddit posts");
        }
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request() {
        let (status, body) = render(PetpalError::validation("Invalid subreddit: a/b")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "VALIDATION_ERROR");
        assert!(body.message.contains("a/b"));
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body) = render(PetpalError::internal("lock poisoned")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.message.contains("poisoned"));
    }
}
