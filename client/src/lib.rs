//! # Sviss ToDo Client
//!
//! Client-side state controller for the todo list.
//!
//! On mount the controller fetches the list once. The answer fixes the mode:
//!
//! - **Persistent**: the server persists the list; every add and remove is
//!   sent over HTTP and the server's list replaces the displayed one
//! - **Ephemeral**: there is no store; adds and removes change an in-memory
//!   list that is lost on re-mount
//!
//! The controller is a [`ClientReducer`] driven by a
//! `sviss_todo_runtime::Store`, which runs HTTP calls as effects and drops
//! them when the view is torn down.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sviss_todo_client::{ClientAction, ClientEnvironment, ClientReducer, ClientState, HttpTodoApi};
//! use sviss_todo_core::environment::ShortIdGenerator;
//! use sviss_todo_runtime::Store;
//!
//! let env = ClientEnvironment::new(Arc::new(HttpTodoApi::from_env()), Arc::new(ShortIdGenerator));
//! let store = Store::new(ClientState::new(), ClientReducer::new(), env);
//!
//! store.send(ClientAction::Mount).await?.wait().await;
//! println!("{}", store.state(|s| s.status_message()).await);
//! ```

pub mod api;
pub mod command;
pub mod reducer;
pub mod types;
pub mod view;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use api::{ApiError, HttpTodoApi, TodoApi};
pub use reducer::{ClientEnvironment, ClientReducer};
pub use types::{ClientAction, ClientState, Mode, Persistence};
