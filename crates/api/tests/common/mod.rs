#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use catalog_db::{Collections, Db};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use catalog_api::config::ServerConfig;
use catalog_api::router::build_app_router;
use catalog_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: None,
        database_max_connections: 1,
        collections: Collections::default(),
    }
}

/// Build the full application router over the given store handle.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_app(db: Db) -> Router {
    let config = test_config();
    let state = AppState {
        db,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Full application over a fresh in-memory store.
pub fn build_test_app() -> Router {
    build_app(Db::memory())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

/// Send a request without a body.
pub async fn send(app: Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a request with a JSON body.
pub async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn film_body(name: &str) -> Value {
    json!({
        "name": name,
        "banner": format!("{name}.png"),
        "description": "description",
        "country": "USSR",
    })
}

pub fn person_body(name: &str) -> Value {
    json!({
        "name": name,
        "kind": 1,
        "birthday": "1932-04-04T00:00:00Z",
        "photo": "photo.jpg",
        "height": 180,
        "career": "director",
        "birth_place": "Zavrazhye",
    })
}

/// POST a body and return the `data.id` of the created document.
pub async fn create(app: &Router, uri: &str, body: Value) -> String {
    let response = send_json(app.clone(), Method::POST, uri, body).await;
    assert_eq!(response.status(), 200, "create at {uri} failed");
    let json = body_json(response).await;
    json["data"]["id"].as_str().unwrap().to_string()
}

pub async fn create_film(app: &Router, name: &str) -> String {
    create(app, "/api/v1/films", film_body(name)).await
}

pub async fn create_person(app: &Router, name: &str) -> String {
    create(app, "/api/v1/persons", person_body(name)).await
}

/// GET `uri` and return its `data` payload.
pub async fn fetch(app: &Router, uri: &str) -> Value {
    let response = get(app.clone(), uri).await;
    assert_eq!(response.status(), 200, "GET {uri} failed");
    body_json(response).await["data"].clone()
}
