//! HTTP request handlers.

pub mod health;
pub mod todos;

pub use health::{health_check, readiness_check};
pub use todos::{add_todo, delete_todo, list_todos};
