//! Integration tests for the `/persons` endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, create_film, create_person, fetch, send, send_json};
use serde_json::json;

#[tokio::test]
async fn create_with_films_links_back() {
    let app = common::build_test_app();
    let film = create_film(&app, "Stalker").await;

    let mut body = common::person_body("Tarkovsky");
    body["films"] = json!([film]);
    let person = common::create(&app, "/api/v1/persons", body).await;

    assert_eq!(fetch(&app, &format!("/api/v1/films/{film}")).await["stuff"], json!([person]));
    let fetched = fetch(&app, &format!("/api/v1/persons/{person}")).await;
    assert_eq!(fetched["kind"], 1);
    assert_eq!(fetched["films"], json!([film]));
}

#[tokio::test]
async fn create_rejects_invalid_input() {
    let app = common::build_test_app();

    let mut body = common::person_body("Tarkovsky");
    body["photo"] = json!(" ");
    let response = send_json(app.clone(), Method::POST, "/api/v1/persons", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let mut body = common::person_body("Tarkovsky");
    body["films"] = json!(["ghost"]);
    let response = send_json(app.clone(), Method::POST, "/api/v1/persons", body).await;
    assert_eq!(body_json(response).await["code"], "MISSING_REFERENCES");

    assert_eq!(fetch(&app, "/api/v1/persons").await, json!([]));
}

#[tokio::test]
async fn update_and_nominations() {
    let app = common::build_test_app();
    let id = create_person(&app, "Tarkovsky").await;
    let uri = format!("/api/v1/persons/{id}");

    let response = send_json(app.clone(), Method::PUT, &uri, json!({"height": 176})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let nomination = format!("{uri}/nominations/palme-d-or");
    assert_eq!(send(app.clone(), Method::PUT, &nomination).await.status(), StatusCode::OK);
    assert_eq!(
        send(app.clone(), Method::PUT, &nomination).await.status(),
        StatusCode::BAD_REQUEST
    );

    let person = fetch(&app, &uri).await;
    assert_eq!(person["height"], 176);
    assert_eq!(person["nominations"], json!(["palme-d-or"]));

    assert_eq!(send(app.clone(), Method::DELETE, &nomination).await.status(), StatusCode::OK);
    assert_eq!(fetch(&app, &uri).await["nominations"], json!([]));
}

#[tokio::test]
async fn film_link_from_person_side() {
    let app = common::build_test_app();
    let film = create_film(&app, "Solaris").await;
    let person = create_person(&app, "Tarkovsky").await;
    let uri = format!("/api/v1/persons/{person}/films/{film}");

    assert_eq!(send(app.clone(), Method::PUT, &uri).await.status(), StatusCode::OK);
    assert_eq!(fetch(&app, &format!("/api/v1/films/{film}")).await["stuff"], json!([person]));

    // Already linked: the first side does not change.
    let response = send(app.clone(), Method::PUT, &uri).await;
    assert_eq!(body_json(response).await["code"], "LINK_FAILED");

    assert_eq!(send(app.clone(), Method::DELETE, &uri).await.status(), StatusCode::OK);
    assert_eq!(fetch(&app, &format!("/api/v1/films/{film}")).await["stuff"], json!([]));
}

#[tokio::test]
async fn delete_sweeps_film_stuff() {
    let app = common::build_test_app();
    let film = create_film(&app, "Stalker").await;
    let person = create_person(&app, "Tarkovsky").await;
    send(app.clone(), Method::PUT, &format!("/api/v1/films/{film}/stuff/{person}")).await;

    let response = send(app.clone(), Method::DELETE, &format!("/api/v1/persons/{person}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await["data"].clone();
    assert_eq!(report["deleted"], true);
    assert_eq!(report["sweeps"][0]["status"], "cleaned");
    assert_eq!(report["sweeps"][0]["count"], 1);

    assert_eq!(fetch(&app, &format!("/api/v1/films/{film}")).await["stuff"], json!([]));

    let response = send(app, Method::DELETE, &format!("/api/v1/persons/{person}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
