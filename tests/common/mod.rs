#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use classroom_api::store::memory::MemoryStore;
use classroom_api::{router, AppState};

/// Application wired to a fresh in-memory store.
pub fn test_app() -> Router {
    router(AppState::new(Arc::new(MemoryStore::new())))
}

/// Drive one request through the router and decode the JSON body (Null for
/// empty bodies such as 204 responses).
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    teacher_header: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(teacher_id) = teacher_header {
        builder = builder.header("x-teacher-id", teacher_id);
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request build"),
        None => builder.body(Body::empty()).expect("request build"),
    };

    let response = app.clone().oneshot(request).await.expect("router call");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collect")
        .to_bytes();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, value)
}

pub async fn create_teacher(app: &Router, name: &str, email: &str) -> Value {
    let (status, body) = request(
        app,
        Method::POST,
        "/teachers",
        None,
        Some(json!({
            "name": name,
            "email": email,
            "registration": "T-100",
            "birth_date": "1980-03-14"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "teacher create failed: {body}");
    body
}

pub async fn create_student(app: &Router, name: &str, email: &str) -> Value {
    let (status, body) = request(
        app,
        Method::POST,
        "/students",
        None,
        Some(json!({
            "name": name,
            "email": email,
            "registration": "S-200",
            "birth_date": "2004-09-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "student create failed: {body}");
    body
}

pub async fn create_classroom(
    app: &Router,
    teacher_id: &str,
    room_number: &str,
    capacity: i32,
) -> Value {
    let (status, body) = request(
        app,
        Method::POST,
        "/classrooms",
        Some(teacher_id),
        Some(json!({
            "room_number": room_number,
            "capacity": capacity,
            "is_available": true,
            "teacher_id": teacher_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "classroom create failed: {body}");
    body
}

pub fn id_of(entity: &Value) -> String {
    entity["id"].as_str().expect("entity id").to_string()
}
