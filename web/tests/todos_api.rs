//! HTTP-level tests for `/api/todos` against an in-memory backend.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use axum::http::StatusCode;
use axum_test::TestServer;
use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;
use sviss_todo_core::wire::{AddResponse, DeleteResponse, ErrorBody, ListResponse, TODOS_PATH};
use sviss_todo_store::mocks::MockBackend;
use sviss_todo_store::TODOS_KEY;
use sviss_todo_testing::properties::{blank_text, padded_todo_text};
use sviss_todo_testing::SequentialIdGenerator;
use sviss_todo_web::{build_router, AppState, CORRELATION_ID_HEADER};

fn server(backend: &MockBackend) -> TestServer {
    let state = AppState::new(
        Arc::new(backend.clone()),
        Arc::new(SequentialIdGenerator::default()),
    );
    TestServer::new(build_router(state)).expect("router should start")
}

async fn list(server: &TestServer) -> ListResponse {
    let response = server.get(TODOS_PATH).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json()
}

async fn add(server: &TestServer, text: &str) -> AddResponse {
    let response = server.post(TODOS_PATH).json(&json!({ "text": text })).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json()
}

#[tokio::test]
async fn add_then_list_contains_new_item() {
    let backend = MockBackend::new();
    let server = server(&backend);

    let added = add(&server, "  Buy milk  ").await;
    assert!(added.persistence);
    assert_eq!(added.item.text, "Buy milk");

    let listed = list(&server).await;
    assert!(listed.persistence);
    assert_eq!(listed.items.items(), &[added.item]);
}

#[tokio::test]
async fn ids_are_unique_across_adds() {
    let backend = MockBackend::new();
    let server = server(&backend);

    let first = add(&server, "one").await;
    let second = add(&server, "two").await;

    assert_ne!(first.item.id, second.item.id);
    assert_eq!(second.items.len(), 2);
}

#[tokio::test]
async fn blank_text_is_rejected_and_list_unchanged() {
    let backend = MockBackend::new();
    let server = server(&backend);
    add(&server, "existing").await;

    for body in [json!({ "text": "" }), json!({ "text": " \t " }), json!({})] {
        let response = server.post(TODOS_PATH).json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<ErrorBody>(),
            ErrorBody {
                error: "Missing text".to_string(),
                persistence: None,
            }
        );
    }

    assert_eq!(list(&server).await.items.len(), 1);
    assert_eq!(backend.write_count(), 1);
}

#[tokio::test]
async fn malformed_bodies_count_as_missing_fields() {
    let backend = MockBackend::new();
    let server = server(&backend);

    let response = server.post(TODOS_PATH).text("not json").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({ "error": "Missing text" }));

    let response = server.post(TODOS_PATH).json(&json!({ "text": 42 })).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server.delete(TODOS_PATH).json(&json!(["id"])).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({ "error": "Missing id" }));
}

#[tokio::test]
async fn delete_unknown_id_is_not_found_every_time() {
    let backend = MockBackend::new();
    let server = server(&backend);
    let added = add(&server, "Buy milk").await;

    let response = server
        .delete(TODOS_PATH)
        .json(&json!({ "id": added.item.id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    for _ in 0..2 {
        let response = server
            .delete(TODOS_PATH)
            .json(&json!({ "id": added.item.id }))
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>(), json!({ "error": "Not found" }));
    }

    // One add and one delete
    assert_eq!(backend.write_count(), 2);
}

#[tokio::test]
async fn delete_present_id_shrinks_list_by_one() {
    let backend = MockBackend::new();
    let server = server(&backend);
    let first = add(&server, "one").await;
    add(&server, "two").await;
    add(&server, "three").await;

    let response = server
        .delete(TODOS_PATH)
        .json(&json!({ "id": first.item.id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let deleted: DeleteResponse = response.json();
    assert!(deleted.persistence);
    assert_eq!(deleted.items.len(), 2);
    assert!(deleted.items.get(&first.item.id).is_none());
    assert_eq!(list(&server).await.items, deleted.items);
}

#[tokio::test]
async fn unreachable_store_lists_ephemeral_and_refuses_mutations() {
    let backend = MockBackend::new();
    backend.insert_raw(TODOS_KEY, r#"[{"id":"a","text":"Stored"}]"#);
    backend.set_reachable(false);
    let server = server(&backend);

    let response = server.get(TODOS_PATH).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "persistence": false, "items": [] })
    );

    let unavailable = json!({ "error": "Redis is not available", "persistence": false });

    let response = server.post(TODOS_PATH).json(&json!({ "text": "x" })).await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>(), unavailable);

    let response = server.delete(TODOS_PATH).json(&json!({ "id": "a" })).await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>(), unavailable);

    assert_eq!(backend.write_count(), 0);
    assert_eq!(
        backend.raw(TODOS_KEY).as_deref(),
        Some(r#"[{"id":"a","text":"Stored"}]"#)
    );
}

#[tokio::test]
async fn failed_read_after_successful_ping_is_internal_error() {
    let backend = MockBackend::new();
    backend.insert_raw(TODOS_KEY, r#"[{"id":"a","text":"Stored"}]"#);
    backend.set_failing_reads(true);
    let server = server(&backend);

    let internal = json!({ "error": "An internal error occurred" });

    let response = server.get(TODOS_PATH).await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), internal);

    let response = server.post(TODOS_PATH).json(&json!({ "text": "x" })).await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), internal);

    let response = server.delete(TODOS_PATH).json(&json!({ "id": "a" })).await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), internal);

    assert_eq!(backend.write_count(), 0);
    assert_eq!(
        backend.raw(TODOS_KEY).as_deref(),
        Some(r#"[{"id":"a","text":"Stored"}]"#)
    );
}

#[tokio::test]
async fn failed_write_leaves_stored_list_intact() {
    let backend = MockBackend::new();
    let server = server(&backend);
    add(&server, "kept").await;
    let before = backend.raw(TODOS_KEY);

    backend.set_failing_writes(true);

    let response = server.post(TODOS_PATH).json(&json!({ "text": "lost" })).await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "An internal error occurred" })
    );

    backend.set_failing_writes(false);
    let listed = list(&server).await;
    assert_eq!(listed.items.len(), 1);
    assert_eq!(backend.raw(TODOS_KEY), before);
    assert_eq!(backend.write_count(), 1);
}

#[tokio::test]
async fn unconfigured_store_never_pings() {
    let backend = MockBackend::unconfigured();
    let server = server(&backend);

    assert!(!list(&server).await.persistence);
    assert_eq!(backend.ping_count(), 0);
}

#[tokio::test]
async fn corrupt_stored_value_reads_as_empty() {
    let backend = MockBackend::new();
    backend.insert_raw(TODOS_KEY, "{not json");
    let server = server(&backend);

    let listed = list(&server).await;
    assert!(listed.persistence);
    assert!(listed.items.is_empty());

    let added = add(&server, "fresh").await;
    assert_eq!(added.items.len(), 1);
}

#[tokio::test]
async fn api_responses_are_not_cacheable() {
    let backend = MockBackend::new();
    let server = server(&backend);

    let response = server.get(TODOS_PATH).await;
    assert_eq!(response.header("cache-control"), "no-store");

    let response = server.post(TODOS_PATH).json(&json!({})).await;
    assert_eq!(response.header("cache-control"), "no-store");
}

#[tokio::test]
async fn responses_carry_correlation_id() {
    let backend = MockBackend::new();
    let server = server(&backend);

    let response = server.get(TODOS_PATH).await;
    let id = response.header(CORRELATION_ID_HEADER);
    assert!(uuid::Uuid::parse_str(id.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn health_endpoints() {
    let backend = MockBackend::new();
    let server = server(&backend);

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "ok");

    let response = server.get("/health/ready").await;
    assert_eq!(
        response.json::<Value>(),
        json!({ "status": "ok", "persistence": true })
    );

    backend.set_reachable(false);
    let response = server.get("/health/ready").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "status": "ok", "persistence": false })
    );
}

#[tokio::test]
async fn end_to_end_buy_milk() {
    let backend = MockBackend::new();
    let server = server(&backend);

    let added = add(&server, "Buy milk").await;
    assert_eq!(added.items.len(), 1);

    let listed = list(&server).await;
    assert_eq!(listed.items.items()[0].text, "Buy milk");

    let response = server
        .delete(TODOS_PATH)
        .json(&json!({ "id": added.item.id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.json::<DeleteResponse>().items.is_empty());

    assert!(list(&server).await.items.is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn add_stores_trimmed_text((raw, trimmed) in padded_todo_text()) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let backend = MockBackend::new();
            let server = server(&backend);

            let added = add(&server, &raw).await;
            let listed = list(&server).await;

            prop_assert_eq!(&added.item.text, &trimmed);
            prop_assert_eq!(listed.items.len(), 1);
            prop_assert_eq!(&listed.items.items()[0], &added.item);
            Ok(())
        })?;
    }

    #[test]
    fn blank_text_never_writes(text in blank_text()) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let backend = MockBackend::new();
            let server = server(&backend);

            let response = server.post(TODOS_PATH).json(&json!({ "text": text })).await;

            prop_assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
            prop_assert_eq!(backend.write_count(), 0);
            Ok(())
        })?;
    }
}
