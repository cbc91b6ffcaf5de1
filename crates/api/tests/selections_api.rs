//! Integration tests for the `/selections` endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, create_film, fetch, get, send, send_json};
use serde_json::json;

#[tokio::test]
async fn create_validates_name_and_films() {
    let app = common::build_test_app();
    let film = create_film(&app, "Stalker").await;

    let response = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/selections",
        json!({"name": "", "films": [film]}),
    )
    .await;
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/selections",
        json!({"name": "Classics", "films": ["ghost"]}),
    )
    .await;
    assert_eq!(body_json(response).await["code"], "NOT_APPLIED");

    let id = common::create(
        &app,
        "/api/v1/selections",
        json!({"name": "Classics", "films": [film]}),
    )
    .await;
    assert_eq!(fetch(&app, &format!("/api/v1/selections/{id}")).await["films"], json!([film]));
}

#[tokio::test]
async fn film_membership() {
    let app = common::build_test_app();
    let a = create_film(&app, "A").await;
    let b = create_film(&app, "B").await;
    let id = common::create(&app, "/api/v1/selections", json!({"name": "Classics"})).await;
    let uri = format!("/api/v1/selections/{id}");

    assert_eq!(
        send(app.clone(), Method::PUT, &format!("{uri}/films/{a}")).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        send(app.clone(), Method::PUT, &format!("{uri}/films/{a}")).await.status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        send(app.clone(), Method::PUT, &format!("{uri}/films/ghost")).await.status(),
        StatusCode::BAD_REQUEST
    );

    let response = send_json(
        app.clone(),
        Method::PUT,
        &format!("{uri}/films"),
        json!({"films": [b]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(fetch(&app, &uri).await["films"], json!([b]));

    assert_eq!(
        send(app.clone(), Method::DELETE, &format!("{uri}/films/{b}")).await.status(),
        StatusCode::OK
    );
    assert_eq!(fetch(&app, &uri).await["films"], json!([]));
}

#[tokio::test]
async fn rename_rejects_empty_name() {
    let app = common::build_test_app();
    let id = common::create(&app, "/api/v1/selections", json!({"name": "Classics"})).await;
    let uri = format!("/api/v1/selections/{id}");

    let response = send_json(
        app.clone(),
        Method::PUT,
        &format!("{uri}/name"),
        json!({"name": " "}),
    )
    .await;
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = send_json(
        app.clone(),
        Method::PUT,
        &format!("{uri}/name"),
        json!({"name": "Noir"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(fetch(&app, &uri).await["name"], "Noir");

    assert_eq!(send(app.clone(), Method::DELETE, &uri).await.status(), StatusCode::OK);
    assert_eq!(get(app, &uri).await.status(), StatusCode::NOT_FOUND);
}
