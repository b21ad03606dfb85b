//! End-to-end HTTP scenarios against the router backed by in-memory
//! repositories.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use skating_elements_api::api::{create_router, AppState};
use skating_elements_api::repository::{
    InMemoryCategoryRepository, InMemoryElementRepository, MockConfig,
};

struct TestResponse {
    status: StatusCode,
    content_type: Option<String>,
    body: Value,
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    TestResponse {
        status,
        content_type,
        body,
    }
}

async fn send_raw(app: &Router, method: Method, uri: &str, body: &'static str) -> TestResponse {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        content_type: None,
        body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
    }
}

fn app() -> Router {
    create_router(AppState::in_memory())
}

async fn create_category(app: &Router, name: &str) -> i64 {
    let res = send(
        app,
        Method::POST,
        "/api/categories",
        Some(json!({ "name": name, "description": format!("{name} elements") })),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    res.body["id"].as_i64().unwrap()
}

fn triple_axel(category_id: i64) -> Value {
    json!({
        "name": "Triple Axel",
        "code": "3A",
        "category_id": category_id,
        "base_value": 8.0,
        "difficulty_level": "elite"
    })
}

#[tokio::test]
async fn category_lifecycle() {
    let app = app();

    let created = send(
        &app,
        Method::POST,
        "/api/categories",
        Some(json!({ "name": "Spins", "description": "Spin elements" })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.content_type.as_deref(), Some("application/json"));
    let id = created.body["id"].as_i64().unwrap();
    assert!(created.body["created_at"].is_string());

    let fetched = send(&app, Method::GET, &format!("/api/categories/{id}"), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, created.body);

    let updated = send(
        &app,
        Method::PUT,
        &format!("/api/categories/{id}"),
        Some(json!({ "name": "Spins2", "description": "d2" })),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["id"].as_i64(), Some(id));
    assert_eq!(updated.body["name"], "Spins2");
    assert_eq!(updated.body["description"], "d2");
    assert_eq!(updated.body["created_at"], created.body["created_at"]);

    let deleted = send(&app, Method::DELETE, &format!("/api/categories/{id}"), None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "Category deleted successfully");

    let gone = send(&app, Method::GET, &format!("/api/categories/{id}"), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["error"], "category not found");
}

#[tokio::test]
async fn update_ignores_payload_id() {
    let app = app();
    let id = create_category(&app, "Jumps").await;
    let other = create_category(&app, "Lifts").await;

    let updated = send(
        &app,
        Method::PUT,
        &format!("/api/categories/{id}"),
        Some(json!({ "id": other, "name": "Jumps", "description": "renamed" })),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["id"].as_i64(), Some(id));

    let untouched = send(&app, Method::GET, &format!("/api/categories/{other}"), None).await;
    assert_eq!(untouched.body["name"], "Lifts");
}

#[tokio::test]
async fn update_is_idempotent() {
    let app = app();
    let category_id = create_category(&app, "Jumps").await;
    let created = send(&app, Method::POST, "/api/elements", Some(triple_axel(category_id))).await;
    let id = created.body["id"].as_i64().unwrap();

    let change = json!({
        "name": "Triple Axel",
        "code": "3A",
        "category_id": category_id,
        "base_value": 8.5,
        "difficulty_level": "elite"
    });
    let uri = format!("/api/elements/{id}");
    let first = send(&app, Method::PUT, &uri, Some(change.clone())).await;
    let second = send(&app, Method::PUT, &uri, Some(change)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, second.body);
    assert_eq!(first.body["base_value"], 8.5);
}

#[tokio::test]
async fn element_detail_includes_category_name() {
    let app = app();
    let category_id = create_category(&app, "Jumps").await;

    let created = send(&app, Method::POST, "/api/elements", Some(triple_axel(category_id))).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert!(created.body.get("category_name").is_none());
    let id = created.body["id"].as_i64().unwrap();

    let detail = send(&app, Method::GET, &format!("/api/elements/{id}"), None).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["category_name"], "Jumps");
    assert_eq!(detail.body["code"], "3A");
    assert_eq!(detail.body["created_at"], created.body["created_at"]);
}

#[tokio::test]
async fn element_detail_resolves_without_category() {
    let app = app();
    let created = send(&app, Method::POST, "/api/elements", Some(triple_axel(424242))).await;
    let id = created.body["id"].as_i64().unwrap();

    let detail = send(&app, Method::GET, &format!("/api/elements/{id}"), None).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.get("category_name").is_none());
}

#[tokio::test]
async fn list_elements_is_ordered_and_plain() {
    let app = app();
    let category_id = create_category(&app, "Jumps").await;
    for code in ["3A", "4T", "3Lz"] {
        let mut body = triple_axel(category_id);
        body["code"] = json!(code);
        send(&app, Method::POST, "/api/elements", Some(body)).await;
    }

    let listed = send(&app, Method::GET, "/api/elements", None).await;
    assert_eq!(listed.status, StatusCode::OK);
    let items = listed.body.as_array().unwrap();
    let codes: Vec<&str> = items.iter().map(|e| e["code"].as_str().unwrap()).collect();
    assert_eq!(codes, vec!["3A", "4T", "3Lz"]);
    assert!(items.iter().all(|e| e.get("category_name").is_none()));
}

#[tokio::test]
async fn missing_element_returns_404() {
    let res = send(&app(), Method::GET, "/api/elements/999999", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.body.get("category_name").is_none());
    assert_eq!(res.body["error"], "element not found");
}

#[tokio::test]
async fn non_numeric_ids_return_400() {
    let app = app();
    let res = send(&app, Method::GET, "/api/elements/abc", None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Invalid element ID");

    let res = send(&app, Method::DELETE, "/api/categories/abc", None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Invalid category ID");

    let res = send(&app, Method::PUT, "/api/elements/1x", Some(triple_axel(1))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Invalid element ID");
}

#[tokio::test]
async fn empty_and_multi_segment_ids_return_400() {
    let app = app();
    for (method, uri, message) in [
        (Method::GET, "/api/elements/", "Invalid element ID"),
        (Method::GET, "/api/elements/1/2", "Invalid element ID"),
        (Method::PUT, "/api/elements/1/", "Invalid element ID"),
        (Method::DELETE, "/api/categories/", "Invalid category ID"),
        (Method::GET, "/api/categories/3/extra", "Invalid category ID"),
    ] {
        let res = send(&app, method.clone(), uri, None).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(res.content_type.as_deref(), Some("application/json"));
        assert_eq!(res.body["error"], message);
    }
}

#[tokio::test]
async fn malformed_bodies_return_400() {
    let app = app();
    let res = send_raw(&app, Method::POST, "/api/categories", "{\"name\":").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Invalid request body");

    let res = send(
        &app,
        Method::POST,
        "/api/elements",
        Some(json!({ "category_id": "jumps" })),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Invalid request body");
}

#[tokio::test]
async fn body_without_content_type_is_accepted() {
    let res = send_raw(
        &app(),
        Method::POST,
        "/api/categories",
        r#"{"name":"Steps","description":"Step sequences"}"#,
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["name"], "Steps");
}

#[tokio::test]
async fn update_of_missing_row_returns_400() {
    let app = app();
    let res = send(
        &app,
        Method::PUT,
        "/api/categories/77",
        Some(json!({ "name": "x", "description": "y" })),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "category not found");

    let res = send(&app, Method::PUT, "/api/elements/77", Some(triple_axel(1))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "element not found");
}

#[tokio::test]
async fn delete_of_missing_row_returns_500_with_not_found_message() {
    let app = app();
    let res = send(&app, Method::DELETE, "/api/elements/77", None).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["error"], "element not found");

    let res = send(&app, Method::DELETE, "/api/categories/77", None).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["error"], "category not found");
}

#[tokio::test]
async fn store_failures_return_opaque_500() {
    let failing = MockConfig {
        fail_queries: true,
        ..MockConfig::default()
    };
    let categories = InMemoryCategoryRepository::with_config(failing.clone());
    let elements = InMemoryElementRepository::with_config(categories.clone(), failing);
    let app = create_router(AppState::new(Arc::new(categories), Arc::new(elements)));

    for (method, uri) in [
        (Method::GET, "/api/categories"),
        (Method::GET, "/api/elements/1"),
        (Method::DELETE, "/api/elements/1"),
    ] {
        let res = send(&app, method, uri, None).await;
        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(res.body["error"], "Internal server error");
    }
}

#[tokio::test]
async fn unknown_category_rejected_when_foreign_keys_enforced() {
    let config = MockConfig {
        enforce_foreign_keys: true,
        ..MockConfig::default()
    };
    let categories = InMemoryCategoryRepository::new();
    let elements = InMemoryElementRepository::with_config(categories.clone(), config);
    let app = create_router(AppState::new(Arc::new(categories), Arc::new(elements)));

    let res = send(&app, Method::POST, "/api/elements", Some(triple_axel(5))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let category_id = create_category(&app, "Jumps").await;
    let res = send(&app, Method::POST, "/api/elements", Some(triple_axel(category_id))).await;
    assert_eq!(res.status, StatusCode::CREATED);
}

#[tokio::test]
async fn referenced_category_cannot_be_deleted() {
    let config = MockConfig {
        enforce_foreign_keys: true,
        ..MockConfig::default()
    };
    let categories = InMemoryCategoryRepository::with_config(config.clone());
    let elements = InMemoryElementRepository::with_config(categories.clone(), config);
    let app = create_router(AppState::new(Arc::new(categories), Arc::new(elements)));

    let category_id = create_category(&app, "Jumps").await;
    let created = send(&app, Method::POST, "/api/elements", Some(triple_axel(category_id))).await;
    let element_id = created.body["id"].as_i64().unwrap();

    let category_uri = format!("/api/categories/{category_id}");
    let res = send(&app, Method::DELETE, &category_uri, None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Request violates a data constraint");

    let res = send(&app, Method::DELETE, &format!("/api/elements/{element_id}"), None).await;
    assert_eq!(res.status, StatusCode::OK);
    let res = send(&app, Method::DELETE, &category_uri, None).await;
    assert_eq!(res.status, StatusCode::OK);
}
