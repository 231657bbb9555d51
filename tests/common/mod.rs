//! Shared helpers for the integration suites: in-memory database setup and
//! a small request driver over the router.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    pool
}

pub async fn create_test_app() -> Router {
    chef_bazaar::routes::router(setup_test_db().await)
}

/// Drive one request through the router and decode the response body.
/// Non-JSON bodies (the liveness banner) come back as a JSON string.
pub async fn request(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(path);

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, value)
}

pub async fn get(app: &Router, path: &str) -> (StatusCode, Value) {
    request(app, Method::GET, path, None).await
}

pub async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    request(app, Method::POST, path, Some(body)).await
}

pub async fn patch_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    request(app, Method::PATCH, path, Some(body)).await
}

/// A syntactically valid identifier that matches nothing in the store.
pub fn unknown_id() -> String {
    ulid::Ulid::new().to_string()
}
