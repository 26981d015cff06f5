//! Plain-text rendering of [`ClientState`].

use crate::types::ClientState;
use std::fmt::Write;

/// Heading printed above the list.
pub const TITLE: &str = "Simple ToDo";

/// Shown instead of an empty list.
pub const EMPTY_LIST: &str = "No items yet";

/// Greeting line; an unset or empty name greets the world.
#[must_use]
pub fn greeting(name: Option<&str>) -> String {
    let name = name.filter(|name| !name.is_empty()).unwrap_or("World");
    format!("Hello {name}!")
}

/// Render the status line, any error, and the numbered list.
#[must_use]
pub fn render(state: &ClientState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{}", state.status_message());

    if let Some(error) = &state.last_error {
        let _ = writeln!(out, "! {error}");
    }

    if state.items().is_empty() {
        if !state.is_loading() {
            let _ = writeln!(out, "  {EMPTY_LIST}");
        }
    } else {
        for (n, item) in state.items().iter().enumerate() {
            let _ = writeln!(out, "  {}. {}  [{}]", n + 1, item.text, item.id);
        }
    }

    out
}
