//! # Sviss ToDo Runtime
//!
//! Runtime implementation that coordinates reducer execution and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that manages state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to reducers
//! - **Teardown**: [`Store::shutdown`] drops in-flight effects so that a
//!   superseded response can never update state
//!
//! ## Example
//!
//! ```ignore
//! use sviss_todo_runtime::Store;
//!
//! let store = Store::new(ClientState::new(), ClientReducer::new(), environment);
//!
//! // Send an action and wait for the effects it started
//! store.send(ClientAction::Mount).await?.wait().await;
//!
//! // Read state
//! let items = store.state(|s| s.items().to_vec()).await;
//!
//! // Tear down, cancelling anything still running
//! store.shutdown();
//! ```

use sviss_todo_core::{effect::Effect, reducer::Reducer};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// A spawned effect task failed
        ///
        /// This typically means an effect panicked.
        #[error("Effect task failed: {0}")]
        TaskJoinError(#[from] tokio::task::JoinError),
    }
}

pub use error::StoreError;

/// Handle to the effects started by one `send`
///
/// Waiting on the handle also waits for effects started by the actions those
/// effects fed back into the store.
#[derive(Debug, Default)]
#[must_use = "effects keep running in the background unless the handle is awaited"]
pub struct EffectHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl EffectHandle {
    /// Create a handle that's already complete
    pub const fn completed() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Number of effect tasks not yet awaited
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for all effects to complete
    ///
    /// Effects cancelled by shutdown count as complete. A panicking effect is
    /// logged and does not propagate.
    pub async fn wait(&mut self) {
        for task in self.tasks.drain(..) {
            if let Err(error) = task.await {
                tracing::error!(error = %StoreError::from(error), "Effect task did not complete");
            }
        }
    }
}

/// Store runtime - owns state and drives the reducer/effect loop
pub mod store {
    use super::{Arc, Effect, EffectHandle, JoinHandle, Reducer, RwLock, StoreError, watch};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (interaction logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<watch::Sender<bool>>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        A: Send + 'static,
        S: Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            let (shutdown, _) = watch::channel(false);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(shutdown),
            }
        }

        /// Send an action to the store
        ///
        /// Runs the reducer under the state write lock, then starts every
        /// returned effect. Actions produced by effects are sent back into the
        /// store automatically.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] once [`Store::shutdown`]
        /// has been called.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            let stopped = *self.shutdown.borrow();
            if stopped {
                return Err(StoreError::ShutdownInProgress);
            }

            let effects = {
                let mut state = self.state.write().await;
                self.reducer.reduce(&mut *state, action, &self.environment)
            };

            let mut tasks = Vec::new();
            for effect in effects {
                if let Some(task) = self.execute_effect(effect) {
                    tasks.push(task);
                }
            }

            Ok(EffectHandle { tasks })
        }

        /// Read from the current state
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Tear the store down
        ///
        /// In-flight effects are dropped before they can feed an action back,
        /// and later calls to [`Store::send`] are rejected. Idempotent.
        pub fn shutdown(&self) {
            if !self.shutdown.send_replace(true) {
                tracing::debug!("Store shut down, cancelling in-flight effects");
            }
        }

        /// Whether [`Store::shutdown`] has been called
        #[must_use]
        pub fn is_shut_down(&self) -> bool {
            *self.shutdown.borrow()
        }

        fn execute_effect(&self, effect: Effect<A>) -> Option<JoinHandle<()>> {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                    None
                },
                Effect::Future(fut) => {
                    tracing::trace!("Executing Effect::Future");
                    let store = self.clone();
                    let mut shutdown = self.shutdown.subscribe();

                    Some(tokio::spawn(async move {
                        let action = tokio::select! {
                            action = fut => action,
                            _ = shutdown.wait_for(|stopped| *stopped) => {
                                tracing::debug!("Effect::Future cancelled by shutdown");
                                return;
                            }
                        };

                        let Some(action) = action else {
                            tracing::trace!("Effect::Future completed with no action");
                            return;
                        };

                        match store.send(action).await {
                            Ok(mut handle) => handle.wait().await,
                            Err(error) => {
                                tracing::debug!(error = %error, "Dropped action produced after shutdown");
                            },
                        }
                    }))
                },
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                shutdown: Arc::clone(&self.shutdown),
            }
        }
    }
}

pub use store::Store;
