//! # Sviss ToDo Testing
//!
//! Testing utilities and helpers shared by the Sviss ToDo crates.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - Deterministic implementations of Environment traits
//! - Helpers for running effect descriptions without a `Store`
//! - proptest strategies for domain values
//!
//! ## Example
//!
//! ```ignore
//! use sviss_todo_testing::{helpers::resolve_effects, SequentialIdGenerator};
//!
//! #[tokio::test]
//! async fn mount_loads_list() {
//!     let env = test_environment();
//!     let mut state = ClientState::new();
//!
//!     let effects = ClientReducer::new().reduce(&mut state, ClientAction::Mount, &env);
//!     let actions = resolve_effects(effects).await;
//!     assert_eq!(actions.len(), 1);
//! }
//! ```


pub use reducer_test::{assertions, ReducerTest};

/// Deterministic implementations of Environment traits.
pub mod mocks {
    use std::sync::atomic::{AtomicU64, Ordering};
    use sviss_todo_core::{environment::IdGenerator, TodoId};

    /// Predictable ids: `{prefix}-1`, `{prefix}-2`, ...
    ///
    /// # Example
    ///
    /// ```
    /// use sviss_todo_testing::mocks::SequentialIdGenerator;
    /// use sviss_todo_core::environment::IdGenerator;
    ///
    /// let ids = SequentialIdGenerator::new("todo");
    /// assert_eq!(ids.next_id().as_str(), "todo-1");
    /// assert_eq!(ids.next_id().as_str(), "todo-2");
    /// ```
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        prefix: String,
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator whose ids start with `prefix`
        #[must_use]
        pub fn new(prefix: impl Into<String>) -> Self {
            Self {
                prefix: prefix.into(),
                next: AtomicU64::new(1),
            }
        }
    }

    impl Default for SequentialIdGenerator {
        fn default() -> Self {
            Self::new("todo")
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> TodoId {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            TodoId::new(format!("{}-{n}", self.prefix))
        }
    }
}

/// Helpers for working with effect descriptions outside a `Store`.
pub mod helpers {
    use sviss_todo_core::effect::Effect;

    /// Run every effect to completion, in order, and collect the actions
    /// they produce.
    ///
    /// Actions are returned rather than fed back, so the caller decides what
    /// the reducer sees next.
    pub async fn resolve_effects<A, I>(effects: I) -> Vec<A>
    where
        I: IntoIterator<Item = Effect<A>>,
    {
        let mut actions = Vec::new();
        for effect in effects {
            match effect {
                Effect::None => {},
                Effect::Future(fut) => actions.extend(fut.await),
            }
        }
        actions
    }
}

/// proptest strategies for domain values.
pub mod properties {
    use proptest::prelude::*;

    /// Non-blank item text, possibly padded with whitespace.
    ///
    /// Returns `(raw, trimmed)`.
    pub fn padded_todo_text() -> impl Strategy<Value = (String, String)> {
        ("[ \t]{0,3}", "[A-Za-z0-9][A-Za-z0-9 ,.!?-]{0,38}[A-Za-z0-9]?", "[ \t\n]{0,3}").prop_map(
            |(lead, body, tail)| {
                let trimmed = body.trim().to_string();
                (format!("{lead}{body}{tail}"), trimmed)
            },
        )
    }

    /// Whitespace-only strings, including the empty string.
    pub fn blank_text() -> impl Strategy<Value = String> {
        "[ \t\n\r]{0,8}"
    }
}

pub use mocks::SequentialIdGenerator;
