//! JSON bodies exchanged over `/api/todos`.
//!
//! Request bodies model every field as optional: handlers treat a missing,
//! mistyped or unparsable field the same way.

use crate::todo::{TodoItem, TodoList};
use serde::{Deserialize, Serialize};

/// Path of the todo collection endpoint.
pub const TODOS_PATH: &str = "/api/todos";

/// Response to `GET /api/todos`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    /// Whether the list is backed by the external store
    #[serde(default)]
    pub persistence: bool,
    /// Current items (always empty without persistence)
    #[serde(default)]
    pub items: TodoList,
}

/// Response to a successful `POST /api/todos`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddResponse {
    /// Always `true`
    pub persistence: bool,
    /// The item that was created
    pub item: TodoItem,
    /// Full list after the append
    pub items: TodoList,
}

/// Response to a successful `DELETE /api/todos`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Always `true`
    pub persistence: bool,
    /// Full list after the removal
    pub items: TodoList,
}

/// Body of `POST /api/todos`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddRequest {
    /// Text of the new item, trimmed by the handler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Body of `DELETE /api/todos`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    /// Id of the item to remove
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Body of every non-2xx response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short user-facing message
    pub error: String,
    /// Present (and `false`) when the store was unavailable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistence: Option<bool>,
}
