//! Reducer for the todo view.
//!
//! The list is fetched once on mount and the answer fixes the mode. In
//! persistent mode every mutation is an HTTP effect whose response replaces
//! the displayed list. In ephemeral mode mutations are applied in place and
//! no effect is produced.

use crate::api::TodoApi;
use crate::types::{ClientAction, ClientState, Mode, ADD_FAILED, DELETE_FAILED};
use std::marker::PhantomData;
use std::sync::Arc;
use sviss_todo_core::{
    effect::Effect, environment::IdGenerator, normalize_text, reducer::Reducer, smallvec,
    SmallVec, TodoId, TodoItem, TodoList,
};

/// Environment dependencies for the client reducer
pub struct ClientEnvironment<A> {
    /// Server access
    pub api: Arc<A>,
    /// Ids for items that only live in memory
    pub ids: Arc<dyn IdGenerator>,
}

impl<A> Clone for ClientEnvironment<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            ids: Arc::clone(&self.ids),
        }
    }
}

impl<A> ClientEnvironment<A> {
    /// Creates a new `ClientEnvironment`
    #[must_use]
    pub fn new(api: Arc<A>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { api, ids }
    }
}

/// Reducer for [`ClientState`]
pub struct ClientReducer<A>(PhantomData<fn() -> A>);

impl<A> ClientReducer<A> {
    /// Creates a new `ClientReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<A> Clone for ClientReducer<A> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<A> Default for ClientReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> std::fmt::Debug for ClientReducer<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ClientReducer")
    }
}

impl<A: TodoApi + 'static> ClientReducer<A> {
    fn fetch_list(env: &ClientEnvironment<A>) -> Effect<ClientAction> {
        let api = Arc::clone(&env.api);
        Effect::future(async move { Some(ClientAction::ListLoaded(api.list().await)) })
    }

    fn request_add(env: &ClientEnvironment<A>, text: String) -> Effect<ClientAction> {
        let api = Arc::clone(&env.api);
        Effect::future(async move { Some(ClientAction::AddCompleted(api.add(&text).await)) })
    }

    fn request_remove(env: &ClientEnvironment<A>, id: TodoId) -> Effect<ClientAction> {
        let api = Arc::clone(&env.api);
        Effect::future(async move { Some(ClientAction::RemoveCompleted(api.remove(&id).await)) })
    }
}

impl<A: TodoApi + 'static> Reducer for ClientReducer<A> {
    type State = ClientState;
    type Action = ClientAction;
    type Environment = ClientEnvironment<A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Lifecycle ==========
            ClientAction::Mount => {
                *state = ClientState::new();
                smallvec![Self::fetch_list(env)]
            },

            ClientAction::ListLoaded(result) => {
                if !state.is_loading() {
                    tracing::debug!("Ignoring list response outside the loading phase");
                    return SmallVec::new();
                }

                state.mode = match result {
                    Ok(response) if response.persistence => Mode::Persistent(response.items),
                    Ok(response) => Mode::Ephemeral(response.items),
                    Err(error) => {
                        tracing::warn!(error = %error, "Initial list failed, continuing without persistence");
                        Mode::Ephemeral(TodoList::new())
                    },
                };
                SmallVec::new()
            },

            // ========== User input ==========
            ClientAction::InputChanged(input) => {
                state.input = input;
                SmallVec::new()
            },

            ClientAction::Add => {
                let Some(text) = normalize_text(&state.input) else {
                    return SmallVec::new();
                };

                match &mut state.mode {
                    Mode::Loading => {
                        tracing::debug!("Ignoring add while loading");
                        SmallVec::new()
                    },
                    Mode::Ephemeral(items) => {
                        items.push(TodoItem::new(env.ids.next_id(), text));
                        state.input.clear();
                        SmallVec::new()
                    },
                    Mode::Persistent(_) => smallvec![Self::request_add(env, text)],
                }
            },

            ClientAction::Remove { id } => match &mut state.mode {
                Mode::Loading => {
                    tracing::debug!("Ignoring remove while loading");
                    SmallVec::new()
                },
                Mode::Ephemeral(items) => {
                    items.remove(&id);
                    SmallVec::new()
                },
                Mode::Persistent(_) => smallvec![Self::request_remove(env, id)],
            },

            // ========== Server responses ==========
            ClientAction::AddCompleted(result) => {
                let Mode::Persistent(items) = &mut state.mode else {
                    return SmallVec::new();
                };

                match result {
                    Ok(response) => {
                        *items = response.items;
                        state.input.clear();
                        state.last_error = None;
                    },
                    Err(error) => {
                        tracing::warn!(error = %error, "Add failed");
                        state.last_error = Some(error.user_message(ADD_FAILED));
                    },
                }
                SmallVec::new()
            },

            ClientAction::RemoveCompleted(result) => {
                let Mode::Persistent(items) = &mut state.mode else {
                    return SmallVec::new();
                };

                match result {
                    Ok(response) => {
                        *items = response.items;
                        state.last_error = None;
                    },
                    Err(error) => {
                        tracing::warn!(error = %error, "Delete failed");
                        state.last_error = Some(error.user_message(DELETE_FAILED));
                    },
                }
                SmallVec::new()
            },
        }
    }
}
