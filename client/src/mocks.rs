//! Scripted in-memory [`TodoApi`] for testing.

use crate::api::{ApiError, TodoApi};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use sviss_todo_core::wire::{AddResponse, DeleteResponse, ListResponse};
use sviss_todo_core::{TodoId, TodoItem, TodoList};

/// In-memory stand-in for the todo server.
///
/// Behaves like the real handlers for the mode it was built in and records
/// how often each operation was called. Failures and a slow initial list can
/// be scripted.
#[derive(Debug, Clone)]
pub struct MockTodoApi {
    inner: Arc<Mutex<MockApiState>>,
}

#[derive(Debug)]
struct MockApiState {
    persistence: bool,
    items: TodoList,
    next_id: u64,
    list_failure: Option<ApiError>,
    mutation_failure: Option<ApiError>,
    list_delay: Option<Duration>,
    list_calls: usize,
    add_calls: usize,
    remove_calls: usize,
}

impl MockTodoApi {
    /// A server with a reachable store.
    #[must_use]
    pub fn persistent() -> Self {
        Self::with_persistence(true)
    }

    /// A server without a store.
    #[must_use]
    pub fn ephemeral() -> Self {
        Self::with_persistence(false)
    }

    fn with_persistence(persistence: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockApiState {
                persistence,
                items: TodoList::new(),
                next_id: 1,
                list_failure: None,
                mutation_failure: None,
                list_delay: None,
                list_calls: 0,
                add_calls: 0,
                remove_calls: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockApiState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the server-side list.
    pub fn seed(&self, items: TodoList) {
        self.lock().items = items;
    }

    /// Server-side list (for testing).
    #[must_use]
    pub fn items(&self) -> TodoList {
        self.lock().items.clone()
    }

    /// Make `list` fail with `error`.
    pub fn fail_list(&self, error: ApiError) {
        self.lock().list_failure = Some(error);
    }

    /// Make `add` and `remove` fail with `error`.
    pub fn fail_mutations(&self, error: ApiError) {
        self.lock().mutation_failure = Some(error);
    }

    /// Delay every `list` answer.
    pub fn delay_list(&self, delay: Duration) {
        self.lock().list_delay = Some(delay);
    }

    /// Number of `list` calls (for testing).
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.lock().list_calls
    }

    /// Number of `add` calls (for testing).
    #[must_use]
    pub fn add_calls(&self) -> usize {
        self.lock().add_calls
    }

    /// Number of `remove` calls (for testing).
    #[must_use]
    pub fn remove_calls(&self) -> usize {
        self.lock().remove_calls
    }

    fn unavailable() -> ApiError {
        ApiError::Status {
            status: 503,
            message: Some("Redis is not available".to_string()),
        }
    }
}

impl TodoApi for MockTodoApi {
    async fn list(&self) -> Result<ListResponse, ApiError> {
        let delay = {
            let mut state = self.lock();
            state.list_calls += 1;
            state.list_delay
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let state = self.lock();
        if let Some(error) = &state.list_failure {
            return Err(error.clone());
        }

        Ok(ListResponse {
            persistence: state.persistence,
            items: if state.persistence {
                state.items.clone()
            } else {
                TodoList::new()
            },
        })
    }

    async fn add(&self, text: &str) -> Result<AddResponse, ApiError> {
        let mut state = self.lock();
        state.add_calls += 1;

        if let Some(error) = &state.mutation_failure {
            return Err(error.clone());
        }
        if !state.persistence {
            return Err(Self::unavailable());
        }

        let id = TodoId::new(format!("server-{}", state.next_id));
        state.next_id += 1;

        let item = TodoItem::new(id, text.trim().to_string());
        state.items.push(item.clone());

        Ok(AddResponse {
            persistence: true,
            item,
            items: state.items.clone(),
        })
    }

    async fn remove(&self, id: &TodoId) -> Result<DeleteResponse, ApiError> {
        let mut state = self.lock();
        state.remove_calls += 1;

        if let Some(error) = &state.mutation_failure {
            return Err(error.clone());
        }
        if !state.persistence {
            return Err(Self::unavailable());
        }
        if !state.items.remove(id) {
            return Err(ApiError::Status {
                status: 404,
                message: Some("Not found".to_string()),
            });
        }

        Ok(DeleteResponse {
            persistence: true,
            items: state.items.clone(),
        })
    }
}
