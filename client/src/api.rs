//! HTTP access to `/api/todos`.

use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::future::Future;
use sviss_todo_core::wire::{
    AddRequest, AddResponse, DeleteRequest, DeleteResponse, ErrorBody, ListResponse, TODOS_PATH,
};
use sviss_todo_core::TodoId;
use thiserror::Error;

/// Base URL used when `TODO_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Errors from talking to the todo server
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status
    #[error("Server returned status {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// `error` field of the response body, when there was one
        message: Option<String>,
    },

    /// The request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// A 2xx response whose body was not the expected JSON
    #[error("Response parsing failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message to show the user: the server's own message if it sent one,
    /// `fallback` otherwise.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// The three operations the client controller needs.
///
/// Implemented by [`HttpTodoApi`] and, for tests, by `mocks::MockTodoApi`.
pub trait TodoApi: Send + Sync {
    /// `GET /api/todos`
    fn list(&self) -> impl Future<Output = Result<ListResponse, ApiError>> + Send;

    /// `POST /api/todos`
    fn add(&self, text: &str) -> impl Future<Output = Result<AddResponse, ApiError>> + Send;

    /// `DELETE /api/todos`
    fn remove(&self, id: &TodoId) -> impl Future<Output = Result<DeleteResponse, ApiError>> + Send;
}

/// [`TodoApi`] over HTTP
#[derive(Clone, Debug)]
pub struct HttpTodoApi {
    client: Client,
    endpoint: String,
}

impl HttpTodoApi {
    /// Create a client with the base URL from `TODO_API_URL`
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("TODO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&base_url)
    }

    /// Create a client for the server at `base_url`
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}{TODOS_PATH}", base_url.trim_end_matches('/')),
        }
    }

    /// Full URL of the todo collection
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TodoApi for HttpTodoApi {
    async fn list(&self) -> Result<ListResponse, ApiError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        decode(response).await
    }

    async fn add(&self, text: &str) -> Result<AddResponse, ApiError> {
        let request = AddRequest {
            text: Some(text.to_string()),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        decode(response).await
    }

    async fn remove(&self, id: &TodoId) -> Result<DeleteResponse, ApiError> {
        let request = DeleteRequest {
            id: Some(id.as_str().to_string()),
        };

        let response = self
            .client
            .delete(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .map(|body| body.error)
            .filter(|message| !message.is_empty());
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ApiError::Status {
            status: 503,
            message: Some("Redis is not available".to_string()),
        };
        assert_eq!(err.user_message("Failed to add"), "Redis is not available");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message("Failed to delete"), "Failed to delete");
        assert_eq!(
            ApiError::Transport("connection refused".to_string()).user_message("Failed to add"),
            "Failed to add"
        );
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        assert_eq!(
            HttpTodoApi::new("http://localhost:3000/").endpoint(),
            "http://localhost:3000/api/todos"
        );
        assert_eq!(
            HttpTodoApi::new("http://example.test").endpoint(),
            "http://example.test/api/todos"
        );
    }
}
