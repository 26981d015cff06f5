//! Domain types for todo lists.
//!
//! A todo list is an ordered sequence of short text items. Items are created
//! and deleted, never edited, and keep the order in which they were appended.

use serde::{Deserialize, Serialize};

/// Unique identifier for a todo item
///
/// Ids are opaque strings: UUIDs when minted by the server, short random
/// strings when minted by a client running without persistence.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Creates a `TodoId` from any string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Trimmed, non-empty text
    pub text: String,
}

impl TodoItem {
    /// Creates a new todo item
    #[must_use]
    pub const fn new(id: TodoId, text: String) -> Self {
        Self { id, text }
    }
}

/// Ordered list of todo items, serialized as a plain JSON array
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoList(Vec<TodoItem>);

impl TodoList {
    /// Creates an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Items in insertion order
    #[must_use]
    pub fn items(&self) -> &[TodoItem] {
        &self.0
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an item by id
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&TodoItem> {
        self.0.iter().find(|item| &item.id == id)
    }

    /// Appends an item at the end
    pub fn push(&mut self, item: TodoItem) {
        self.0.push(item);
    }

    /// Removes every item with the given id.
    ///
    /// Returns `true` if anything was removed.
    pub fn remove(&mut self, id: &TodoId) -> bool {
        let before = self.0.len();
        self.0.retain(|item| &item.id != id);
        self.0.len() != before
    }

    /// Iterates over the items in order
    pub fn iter(&self) -> std::slice::Iter<'_, TodoItem> {
        self.0.iter()
    }
}

impl From<Vec<TodoItem>> for TodoList {
    fn from(items: Vec<TodoItem>) -> Self {
        Self(items)
    }
}

impl FromIterator<TodoItem> for TodoList {
    fn from_iter<I: IntoIterator<Item = TodoItem>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a TodoItem;
    type IntoIter = std::slice::Iter<'a, TodoItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for TodoList {
    type Item = TodoItem;
    type IntoIter = std::vec::IntoIter<TodoItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Trims user input, returning `None` when nothing is left.
#[must_use]
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
