//! HTTP surface of Sviss ToDo.
//!
//! Three handlers over one whole-list repository, plus the ambient pieces a
//! deployed service needs.
//!
//! # Request Flow
//!
//! 1. **Correlation id** is read or generated by the middleware
//! 2. **Probe** the store; an unreachable store short-circuits the request
//! 3. **Extract** the body leniently (malformed means absent)
//! 4. **Read-modify-write** the list through [`sviss_todo_store::TodoRepository`]
//! 5. **Map** the result or [`AppError`] to a JSON response
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sviss_todo_core::environment::UuidIdGenerator;
//! use sviss_todo_store::RedisBackend;
//! use sviss_todo_web::{build_router, AppState};
//!
//! let backend = Arc::new(RedisBackend::new(Some("redis://127.0.0.1:6379"))?);
//! let app = build_router(AppState::new(backend, Arc::new(UuidIdGenerator)));
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use config::{Config, ConfigError};
pub use error::AppError;
pub use extractors::{CorrelationId, LenientJson};
pub use middleware::{correlation_id_layer, CORRELATION_ID_HEADER};
pub use router::build_router;
pub use state::AppState;
