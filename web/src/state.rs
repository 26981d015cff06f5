//! Application state for Axum handlers.
//!
//! Handlers receive the backend capability and the id source through
//! [`AppState`]; nothing is global, so tests hand in a `MockBackend` and a
//! deterministic id generator.

use std::sync::Arc;
use sviss_todo_core::environment::IdGenerator;
use sviss_todo_store::{is_available, KeyValueBackend, TodoRepository};

/// Application state shared across all HTTP handlers.
///
/// # Examples
///
/// ```ignore
/// use std::sync::Arc;
/// use sviss_todo_core::environment::UuidIdGenerator;
/// use sviss_todo_store::RedisBackend;
/// use sviss_todo_web::AppState;
///
/// let backend = Arc::new(RedisBackend::new(Some("redis://127.0.0.1:6379"))?);
/// let state = AppState::new(backend, Arc::new(UuidIdGenerator));
/// ```
pub struct AppState<B> {
    backend: Arc<B>,
    repository: TodoRepository<B>,
    ids: Arc<dyn IdGenerator>,
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            repository: self.repository.clone(),
            ids: Arc::clone(&self.ids),
        }
    }
}

impl<B: KeyValueBackend> AppState<B> {
    /// Create state over a backend and an id source for new items.
    #[must_use]
    pub fn new(backend: Arc<B>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            repository: TodoRepository::new(Arc::clone(&backend)),
            backend,
            ids,
        }
    }

    /// Probe the backend; see [`is_available`].
    pub async fn persistence_available(&self) -> bool {
        is_available(self.backend.as_ref()).await
    }

    /// Whole-list repository over the backend.
    #[must_use]
    pub const fn repository(&self) -> &TodoRepository<B> {
        &self.repository
    }

    /// Id source for newly created items.
    #[must_use]
    pub fn ids(&self) -> &dyn IdGenerator {
        self.ids.as_ref()
    }
}
