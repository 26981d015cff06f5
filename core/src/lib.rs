//! # Sviss ToDo Core
//!
//! Core traits and types shared by every Sviss ToDo crate.
//!
//! ## Core Concepts
//!
//! - **State**: Data owned by a feature (the client's displayed list, input, mode)
//! - **Action**: All possible inputs to a reducer (user intents and server results)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! The [`todo`] module holds the domain model and the [`wire`] module the
//! JSON bodies exchanged between the client and the request handlers.
//!
//! ## Example
//!
//! ```ignore
//! use sviss_todo_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! impl Reducer for ClientReducer {
//!     type State = ClientState;
//!     type Action = ClientAction;
//!     type Environment = ClientEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut ClientState,
//!         action: ClientAction,
//!         env: &ClientEnvironment,
//!     ) -> SmallVec<[Effect<ClientAction>; 4]> {
//!         SmallVec::new()
//!     }
//! }
//! ```

pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

pub mod todo;
pub mod wire;

pub use todo::{normalize_text, TodoId, TodoItem, TodoList};

/// Reducer module - The core trait for interaction logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all decision making and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for interaction logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values, not execution, and are dropped unexecuted when the
/// runtime shuts down.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Wrap an async computation as an effect
        #[must_use]
        pub fn future<F>(fut: F) -> Self
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All nondeterministic dependencies are abstracted behind traits and injected
/// via the Environment parameter or handler state.
pub mod environment {
    use crate::todo::TodoId;
    use rand::Rng;
    use uuid::Uuid;

    /// Id generator trait - abstracts id creation for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use sviss_todo_core::environment::{IdGenerator, UuidIdGenerator};
    ///
    /// let ids = UuidIdGenerator;
    /// assert_ne!(ids.next_id(), ids.next_id());
    /// ```
    pub trait IdGenerator: Send + Sync {
        /// Produce a fresh id
        fn next_id(&self) -> TodoId;
    }

    /// Random UUID v4 ids, used by the request handlers
    #[derive(Clone, Copy, Debug, Default)]
    pub struct UuidIdGenerator;

    impl IdGenerator for UuidIdGenerator {
        fn next_id(&self) -> TodoId {
            TodoId::new(Uuid::new_v4().to_string())
        }
    }

    /// Short random base-36 ids for items that only live in client memory
    #[derive(Clone, Copy, Debug, Default)]
    pub struct ShortIdGenerator;

    impl ShortIdGenerator {
        const LEN: usize = 11;
        const ALPHABET: &'static [u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    }

    impl IdGenerator for ShortIdGenerator {
        fn next_id(&self) -> TodoId {
            let mut rng = rand::thread_rng();
            let id: String = (0..Self::LEN)
                .map(|_| char::from(Self::ALPHABET[rng.gen_range(0..Self::ALPHABET.len())]))
                .collect();
            TodoId::new(id)
        }
    }
}
