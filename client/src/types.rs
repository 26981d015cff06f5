//! Client state and actions.

use crate::api::ApiError;
use sviss_todo_core::wire::{AddResponse, DeleteResponse, ListResponse};
use sviss_todo_core::{normalize_text, TodoId, TodoItem, TodoList};

/// Status line while the initial list is being fetched.
pub const STATUS_LOADING: &str = "Checking Redis...";

/// Status line when the server persists the list.
pub const STATUS_PERSISTENT: &str = "Redis reachable. Items persist across refreshes.";

/// Status line when the list only lives in this session.
pub const STATUS_EPHEMERAL: &str = "Redis not reachable.";

/// Error shown when an add fails without a server message.
pub const ADD_FAILED: &str = "Failed to add";

/// Error shown when a delete fails without a server message.
pub const DELETE_FAILED: &str = "Failed to delete";

/// Where the displayed list lives.
///
/// Chosen once, from the initial list response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Initial fetch in flight
    Loading,
    /// The server is the source of truth; mutations go over HTTP
    Persistent(TodoList),
    /// Memory only, lost on re-mount
    Ephemeral(TodoList),
}

/// Tri-state persistence flag derived from [`Mode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Persistence {
    /// Not known yet
    Unknown,
    /// Backed by the external store
    Available,
    /// In-memory only
    Unavailable,
}

/// Session state of the todo view. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientState {
    /// Displayed list and how it is backed
    pub mode: Mode,
    /// Pending input text
    pub input: String,
    /// Message from the last failed mutation
    pub last_error: Option<String>,
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientState {
    /// Fresh state, waiting for the initial list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: Mode::Loading,
            input: String::new(),
            last_error: None,
        }
    }

    /// State already settled in ephemeral mode.
    #[must_use]
    pub const fn ephemeral(items: TodoList) -> Self {
        Self {
            mode: Mode::Ephemeral(items),
            input: String::new(),
            last_error: None,
        }
    }

    /// State already settled in persistent mode.
    #[must_use]
    pub const fn persistent(items: TodoList) -> Self {
        Self {
            mode: Mode::Persistent(items),
            input: String::new(),
            last_error: None,
        }
    }

    /// Items to display (empty while loading).
    #[must_use]
    pub fn items(&self) -> &[TodoItem] {
        match &self.mode {
            Mode::Loading => &[],
            Mode::Persistent(list) | Mode::Ephemeral(list) => list.items(),
        }
    }

    /// Tri-state persistence flag.
    #[must_use]
    pub const fn persistence(&self) -> Persistence {
        match self.mode {
            Mode::Loading => Persistence::Unknown,
            Mode::Persistent(_) => Persistence::Available,
            Mode::Ephemeral(_) => Persistence::Unavailable,
        }
    }

    /// Whether the initial fetch is still in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.mode, Mode::Loading)
    }

    /// One-line description of the persistence mode.
    #[must_use]
    pub const fn status_message(&self) -> &'static str {
        match self.mode {
            Mode::Loading => STATUS_LOADING,
            Mode::Persistent(_) => STATUS_PERSISTENT,
            Mode::Ephemeral(_) => STATUS_EPHEMERAL,
        }
    }

    /// Whether an add would do anything right now.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && normalize_text(&self.input).is_some()
    }
}

/// Everything that can happen to a [`ClientState`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientAction {
    /// View shown: reset and fetch the list
    Mount,
    /// Initial list response
    ListLoaded(Result<ListResponse, ApiError>),
    /// The user edited the pending input
    InputChanged(String),
    /// The user submitted the pending input
    Add,
    /// The user asked to remove an item
    Remove {
        /// Item to remove
        id: TodoId,
    },
    /// Server answer to an add
    AddCompleted(Result<AddResponse, ApiError>),
    /// Server answer to a remove
    RemoveCompleted(Result<DeleteResponse, ApiError>),
}
