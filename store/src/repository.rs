//! Whole-list todo repository.
//!
//! # Architecture
//!
//! The list is stored as:
//! - **Key**: `todos` → JSON array of `{id, text}` objects
//!
//! There is no per-item key and no versioning. Writers replace the whole
//! value, so two concurrent read-modify-write sequences race and the later
//! write wins.

use crate::backend::KeyValueBackend;
use crate::error::Result;
use serde_json::Value;
use std::sync::Arc;
use sviss_todo_core::{TodoItem, TodoList};

/// Key holding the serialized list.
pub const TODOS_KEY: &str = "todos";

/// Reads and replaces the todo list stored under [`TODOS_KEY`].
pub struct TodoRepository<B> {
    backend: Arc<B>,
}

impl<B> Clone for TodoRepository<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: KeyValueBackend> TodoRepository<B> {
    /// Create a repository over the given backend.
    #[must_use]
    pub const fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Fetch the current list.
    ///
    /// An absent key, a value that is not JSON, or JSON that is not an array
    /// all read as the empty list.
    ///
    /// # Errors
    ///
    /// Returns error only if the backend request itself fails.
    pub async fn read_all(&self) -> Result<TodoList> {
        let raw = self.backend.get(TODOS_KEY).await?;
        Ok(raw.as_deref().map(decode_list).unwrap_or_default())
    }

    /// Replace the stored list with `list`.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the backend request fails.
    pub async fn write_all(&self, list: &TodoList) -> Result<()> {
        let raw = serde_json::to_string(list)?;
        self.backend.set(TODOS_KEY, raw).await?;

        tracing::debug!(items = list.len(), "Wrote todo list");
        Ok(())
    }
}

/// Decode a stored list, reading anything that is not a JSON array as empty.
///
/// Elements that are not `{id, text}` objects are dropped here. Because every
/// mutation writes the whole list back, the next successful write deletes
/// those elements from the store permanently.
fn decode_list(raw: &str) -> TodoList {
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) => {
            tracing::warn!("Stored todo list is not an array, reading as empty");
            return TodoList::new();
        }
        Err(error) => {
            tracing::warn!(error = %error, "Stored todo list is not valid JSON, reading as empty");
            return TodoList::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<TodoItem>(entry) {
            Ok(item) => Some(item),
            Err(error) => {
                tracing::warn!(error = %error, "Skipping malformed todo entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::mocks::MockBackend;
    use sviss_todo_core::TodoId;

    fn repository(backend: &MockBackend) -> TodoRepository<MockBackend> {
        TodoRepository::new(Arc::new(backend.clone()))
    }

    #[tokio::test]
    async fn test_absent_key_reads_empty() {
        let backend = MockBackend::new();
        assert!(repository(&backend).read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_json_reads_empty() {
        let backend = MockBackend::new();
        backend.insert_raw(TODOS_KEY, "{not json");
        assert!(repository(&backend).read_all().await.unwrap().is_empty());

        backend.insert_raw(TODOS_KEY, "");
        assert!(repository(&backend).read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_array_reads_empty() {
        let backend = MockBackend::new();
        backend.insert_raw(TODOS_KEY, r#"{"id":"1","text":"x"}"#);
        assert!(repository(&backend).read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_entries_are_skipped() {
        let backend = MockBackend::new();
        backend.insert_raw(TODOS_KEY, r#"[{"id":"1","text":"keep"}, 42, {"text":"no id"}]"#);

        let list = repository(&backend).read_all().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].text, "keep");
    }

    #[tokio::test]
    async fn test_malformed_entries_are_gone_after_next_write() {
        let backend = MockBackend::new();
        backend.insert_raw(TODOS_KEY, r#"[{"id":"1","text":"keep"}, 42]"#);
        let repo = repository(&backend);

        let list = repo.read_all().await.unwrap();
        repo.write_all(&list).await.unwrap();

        assert_eq!(
            backend.raw(TODOS_KEY).as_deref(),
            Some(r#"[{"id":"1","text":"keep"}]"#)
        );
    }

    #[tokio::test]
    async fn test_write_replaces_whole_list() {
        let backend = MockBackend::new();
        let repo = repository(&backend);

        let mut list = TodoList::new();
        list.push(TodoItem::new(TodoId::from("1"), "Buy milk".to_string()));
        repo.write_all(&list).await.unwrap();

        assert_eq!(
            backend.raw(TODOS_KEY).as_deref(),
            Some(r#"[{"id":"1","text":"Buy milk"}]"#)
        );
        assert_eq!(repo.read_all().await.unwrap(), list);

        repo.write_all(&TodoList::new()).await.unwrap();
        assert_eq!(backend.raw(TODOS_KEY).as_deref(), Some("[]"));
        assert_eq!(backend.write_count(), 2);
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let backend = MockBackend::unreachable();
        assert!(repository(&backend).read_all().await.is_err());
        assert!(repository(&backend).write_all(&TodoList::new()).await.is_err());
    }
}
