//! Error types for web handlers.
//!
//! This module bridges store errors and HTTP responses, implementing Axum's
//! `IntoResponse` trait. Every error renders as an [`ErrorBody`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;
use sviss_todo_core::wire::ErrorBody;
use sviss_todo_store::StoreError;

/// Message returned for unexpected failures; details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Message returned when a mutation is attempted without a reachable store.
pub const STORE_UNAVAILABLE_MESSAGE: &str = "Redis is not available";

/// Application error type for web handlers.
///
/// # Examples
///
/// ```ignore
/// async fn handler() -> Result<Json<ListResponse>, AppError> {
///     let items = repository.read_all().await?;
///     Ok(Json(ListResponse { persistence: true, items }))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for logs)
    code: &'static str,
    /// Echoed as `persistence` in the body when set
    persistence: Option<bool>,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: &'static str) -> Self {
        Self {
            status,
            message,
            code,
            persistence: None,
            source: None,
        }
    }

    /// Create a new error with a source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message.into(), "BAD_REQUEST")
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message.into(), "NOT_FOUND")
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR",
        )
    }

    /// Create a 503 Service Unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            message.into(),
            "SERVICE_UNAVAILABLE",
        )
    }

    /// 503 for a mutation attempted while the store is unreachable.
    #[must_use]
    pub fn store_unavailable() -> Self {
        let mut error = Self::unavailable(STORE_UNAVAILABLE_MESSAGE);
        error.persistence = Some(false);
        error
    }

    /// HTTP status this error renders with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// User-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    error = %source,
                    "Internal server error"
                );
            } else {
                tracing::warn!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    "Request failed"
                );
            }
        }

        let body = ErrorBody {
            error: self.message,
            persistence: self.persistence,
        };

        (self.status, Json(body)).into_response()
    }
}

/// Backend failures during read or write are unexpected: 500.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::internal(INTERNAL_ERROR_MESSAGE).with_source(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    #[test]
    fn test_error_display() {
        let err = AppError::bad_request("Missing text");
        assert_eq!(err.to_string(), "[BAD_REQUEST] Missing text");
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = body_of(AppError::not_found("Not found")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn test_store_unavailable_body() {
        let (status, body) = body_of(AppError::store_unavailable()).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body,
            serde_json::json!({ "error": "Redis is not available", "persistence": false })
        );
    }

    #[tokio::test]
    async fn test_store_error_hides_details() {
        let err = AppError::from(StoreError::Unavailable("connection reset".to_string()));
        assert!(std::error::Error::source(&err).is_some());

        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "An internal error occurred" }));
    }
}
