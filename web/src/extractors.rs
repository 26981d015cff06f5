//! Custom Axum extractors.
//!
//! - `LenientJson`: JSON body that falls back to `T::default()` instead of rejecting
//! - `CorrelationId`: the request correlation id
//!
//! # Examples
//!
//! ```ignore
//! use sviss_todo_web::extractors::{CorrelationId, LenientJson};
//!
//! async fn handler(
//!     correlation_id: CorrelationId,
//!     LenientJson(body): LenientJson<AddRequest>,
//! ) -> Result<Json<AddResponse>, AppError> {
//!     tracing::info!(correlation_id = %correlation_id.0, "Adding item");
//!     ...
//! }
//! ```

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use uuid::Uuid;

use crate::middleware::CORRELATION_ID_HEADER;

/// JSON request body that never rejects.
///
/// A body that cannot be read, is not JSON, or does not match `T` yields
/// `T::default()`. Handlers then see every field as absent and answer with
/// their own validation error.
///
/// # Example
///
/// ```ignore
/// async fn handler(LenientJson(body): LenientJson<DeleteRequest>) {
///     let Some(id) = body.id else { /* 400 */ };
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match Bytes::from_request(req, state).await {
            Ok(bytes) => parse_lenient(&bytes),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Unreadable request body, treating as empty");
                T::default()
            }
        };

        Ok(Self(value))
    }
}

fn parse_lenient<T: DeserializeOwned + Default>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap_or_else(|error| {
        tracing::debug!(error = %error, "Malformed JSON body, treating fields as absent");
        T::default()
    })
}

/// Correlation ID for request tracing.
///
/// Prefers the id stored by the correlation middleware, then the
/// `X-Correlation-ID` header, and generates a new UUID v4 otherwise.
///
/// # Example
///
/// ```ignore
/// async fn handler(correlation_id: CorrelationId) -> String {
///     format!("Request ID: {}", correlation_id.0)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Uuid>() {
            return Ok(Self(*id));
        }

        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}
