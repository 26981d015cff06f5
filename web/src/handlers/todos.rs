//! `/api/todos` handlers.
//!
//! Every operation probes the store first. Without a reachable store, List
//! answers with an empty ephemeral list and the mutations answer 503 before
//! looking at the body.
//!
//! Mutations are whole-list read-modify-write sequences with no coordination
//! between concurrent requests; the later write wins.

use axum::{extract::State, http::StatusCode, Json};
use sviss_todo_core::wire::{AddRequest, AddResponse, DeleteRequest, DeleteResponse, ListResponse};
use sviss_todo_core::{normalize_text, TodoId, TodoItem, TodoList};
use sviss_todo_store::KeyValueBackend;

use crate::error::AppError;
use crate::extractors::{CorrelationId, LenientJson};
use crate::state::AppState;

/// 400 message for a missing or blank `text`.
pub const MISSING_TEXT: &str = "Missing text";

/// 400 message for a missing or empty `id`.
pub const MISSING_ID: &str = "Missing id";

/// 404 message when no item has the requested id.
pub const NOT_FOUND: &str = "Not found";

/// `GET /api/todos`
///
/// # Errors
///
/// 500 if the store answered the probe but then failed the read.
pub async fn list_todos<B>(
    State(state): State<AppState<B>>,
    correlation_id: CorrelationId,
) -> Result<Json<ListResponse>, AppError>
where
    B: KeyValueBackend + 'static,
{
    if !state.persistence_available().await {
        tracing::debug!(correlation_id = %correlation_id.0, "Store unavailable, listing ephemeral");
        record("list", "ephemeral");
        return Ok(Json(ListResponse {
            persistence: false,
            items: TodoList::new(),
        }));
    }

    let result = state.repository().read_all().await.map_err(AppError::from);
    record_result("list", &result);

    Ok(Json(ListResponse {
        persistence: true,
        items: result?,
    }))
}

/// `POST /api/todos` with `{"text": "..."}`
///
/// # Errors
///
/// - 503 when the store is unavailable
/// - 400 when `text` is missing or blank
/// - 500 when the store fails mid-operation
pub async fn add_todo<B>(
    State(state): State<AppState<B>>,
    correlation_id: CorrelationId,
    LenientJson(body): LenientJson<AddRequest>,
) -> Result<Json<AddResponse>, AppError>
where
    B: KeyValueBackend + 'static,
{
    let result = add(&state, body).await;
    record_result("add", &result);

    if let Ok(response) = &result {
        tracing::info!(
            correlation_id = %correlation_id.0,
            id = %response.item.id,
            items = response.items.len(),
            "Added todo"
        );
    }

    result.map(Json)
}

async fn add<B: KeyValueBackend>(state: &AppState<B>, body: AddRequest) -> Result<AddResponse, AppError> {
    if !state.persistence_available().await {
        return Err(AppError::store_unavailable());
    }

    let Some(text) = body.text.as_deref().and_then(normalize_text) else {
        return Err(AppError::bad_request(MISSING_TEXT));
    };

    let mut items = state.repository().read_all().await?;
    let item = TodoItem::new(state.ids().next_id(), text);
    items.push(item.clone());
    state.repository().write_all(&items).await?;

    Ok(AddResponse {
        persistence: true,
        item,
        items,
    })
}

/// `DELETE /api/todos` with `{"id": "..."}`
///
/// # Errors
///
/// - 503 when the store is unavailable
/// - 400 when `id` is missing or empty
/// - 404 when no item has that id (nothing is written)
/// - 500 when the store fails mid-operation
pub async fn delete_todo<B>(
    State(state): State<AppState<B>>,
    correlation_id: CorrelationId,
    LenientJson(body): LenientJson<DeleteRequest>,
) -> Result<Json<DeleteResponse>, AppError>
where
    B: KeyValueBackend + 'static,
{
    let result = delete(&state, body).await;
    record_result("delete", &result);

    if let Ok(response) = &result {
        tracing::info!(
            correlation_id = %correlation_id.0,
            items = response.items.len(),
            "Deleted todo"
        );
    }

    result.map(Json)
}

async fn delete<B: KeyValueBackend>(
    state: &AppState<B>,
    body: DeleteRequest,
) -> Result<DeleteResponse, AppError> {
    if !state.persistence_available().await {
        return Err(AppError::store_unavailable());
    }

    let Some(id) = body.id.filter(|id| !id.is_empty()) else {
        return Err(AppError::bad_request(MISSING_ID));
    };

    let mut items = state.repository().read_all().await?;
    if !items.remove(&TodoId::from(id)) {
        return Err(AppError::not_found(NOT_FOUND));
    }
    state.repository().write_all(&items).await?;

    Ok(DeleteResponse {
        persistence: true,
        items,
    })
}

fn record_result<T>(op: &'static str, result: &Result<T, AppError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) if e.status() == StatusCode::SERVICE_UNAVAILABLE => "unavailable",
        Err(e) if e.status().is_client_error() => "rejected",
        Err(_) => "error",
    };
    record(op, outcome);
}

fn record(op: &'static str, outcome: &'static str) {
    metrics::counter!("todos.requests", "op" => op, "outcome" => outcome).increment(1);
}
