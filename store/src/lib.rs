//! Key-value persistence for Sviss ToDo.
//!
//! The whole todo list lives as one JSON array under a single key. This crate
//! provides:
//!
//! - [`KeyValueBackend`]: the capability handed to request handlers
//! - [`is_available`]: the per-request availability probe
//! - [`TodoRepository`]: whole-list read and replace
//! - [`RedisBackend`]: the production backend
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use sviss_todo_store::{is_available, RedisBackend, TodoRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(RedisBackend::new(Some("redis://127.0.0.1:6379"))?);
//! if is_available(backend.as_ref()).await {
//!     let repository = TodoRepository::new(backend);
//!     let list = repository.read_all().await?;
//!     println!("{} items", list.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod availability;
pub mod backend;
pub mod error;
pub mod redis_backend;
pub mod repository;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use availability::is_available;
pub use backend::KeyValueBackend;
pub use error::{Result, StoreError};
pub use redis_backend::RedisBackend;
pub use repository::{TodoRepository, TODOS_KEY};
