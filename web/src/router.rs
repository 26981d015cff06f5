//! Router assembly.

use axum::{routing::get, Router};
use http::{header::CACHE_CONTROL, HeaderValue};
use sviss_todo_core::wire::TODOS_PATH;
use sviss_todo_store::KeyValueBackend;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::handlers::{add_todo, delete_todo, health_check, list_todos, readiness_check};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;

/// Build the application router.
///
/// - `GET|POST|DELETE /api/todos`, every response marked `Cache-Control: no-store`
/// - `GET /health` and `GET /health/ready`
///
/// Requests pass through the correlation-id middleware and `TraceLayer`.
pub fn build_router<B>(state: AppState<B>) -> Router
where
    B: KeyValueBackend + 'static,
{
    let todos = get(list_todos::<B>)
        .post(add_todo::<B>)
        .delete(delete_todo::<B>)
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    Router::new()
        .route(TODOS_PATH, todos)
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check::<B>))
        .with_state(state)
        .layer(correlation_id_layer())
        .layer(TraceLayer::new_for_http())
}
