//! Integration tests for the `/films` endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, create_film, create_person, fetch, get, send, send_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_get_and_list() {
    let app = common::build_test_app();
    let mut body = common::film_body("Stalker");
    body["age_limit"] = json!(21);
    body["kind"] = json!(1);
    let response = send_json(app.clone(), Method::POST, "/api/v1/films", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let id = body_json(response).await["data"]["id"].as_str().unwrap().to_string();

    let film = fetch(&app, &format!("/api/v1/films/{id}")).await;
    assert_eq!(film["name"], "Stalker");
    assert_eq!(film["age_limit"], 18);
    assert_eq!(film["kind"], 1);
    assert_eq!(film["view_count"], 0);

    create_film(&app, "Mirror").await;
    let page = fetch(&app, "/api/v1/films?limit=1&offset=1").await;
    assert_eq!(page.as_array().unwrap().len(), 1);
    assert_eq!(page[0]["name"], "Mirror");
}

#[tokio::test]
async fn missing_film_is_404() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/films/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn create_with_unknown_person_lists_missing_ids() {
    let app = common::build_test_app();
    let mut body = common::film_body("Stalker");
    body["stuff"] = json!(["ghost"]);
    let response = send_json(app.clone(), Method::POST, "/api/v1/films", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_REFERENCES");
    assert!(json["error"].as_str().unwrap().contains("ghost"));

    assert_eq!(fetch(&app, "/api/v1/films").await, json!([]));
}

#[tokio::test]
async fn unknown_enum_code_is_rejected() {
    let app = common::build_test_app();
    let mut body = common::film_body("Stalker");
    body["release_type"] = json!(7);
    let response = send_json(app, Method::POST, "/api/v1/films", body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn merge_patch_touches_only_given_fields() {
    let app = common::build_test_app();
    let id = create_film(&app, "Stalker").await;
    let uri = format!("/api/v1/films/{id}");

    let response = send_json(
        app.clone(),
        Method::PUT,
        &uri,
        json!({"description": "The Zone", "fees": 1000}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["success"], true);

    let film = fetch(&app, &uri).await;
    assert_eq!(film["name"], "Stalker");
    assert_eq!(film["description"], "The Zone");
    assert_eq!(film["fees"], 1000);

    // Same values again: nothing modified.
    let response = send_json(app.clone(), Method::PUT, &uri, json!({"fees": 1000})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "NOT_APPLIED");

    let response = send_json(app.clone(), Method::PUT, &uri, json!({"name": null})).await;
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Lists and seasons
// ---------------------------------------------------------------------------

#[tokio::test]
async fn value_lists_have_set_semantics() {
    let app = common::build_test_app();
    let id = create_film(&app, "Stalker").await;
    let uri = format!("/api/v1/films/{id}/lists/genres/drama");

    assert_eq!(send(app.clone(), Method::PUT, &uri).await.status(), StatusCode::OK);
    assert_eq!(
        send(app.clone(), Method::PUT, &uri).await.status(),
        StatusCode::BAD_REQUEST
    );
    let film = fetch(&app, &format!("/api/v1/films/{id}")).await;
    assert_eq!(film["genres"], json!(["drama"]));

    assert_eq!(send(app.clone(), Method::DELETE, &uri).await.status(), StatusCode::OK);
    assert_eq!(
        send(app.clone(), Method::DELETE, &uri).await.status(),
        StatusCode::BAD_REQUEST
    );

    let response = send(app, Method::PUT, &format!("/api/v1/films/{id}/lists/posters/x")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn seasons_are_replaced_wholesale() {
    let app = common::build_test_app();
    let id = create_film(&app, "Twin Peaks").await;
    let uri = format!("/api/v1/films/{id}/seasons");

    let seasons = json!([
        {"num": 1, "banner": "s1.png", "serias": [{"num": 1, "file_id": "f1"}]},
        {"num": 2, "banner": "s2.png"},
    ]);
    let response = send_json(app.clone(), Method::PUT, &uri, seasons).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_json(
        app.clone(),
        Method::PUT,
        &uri,
        json!([{"num": 3, "banner": "s3.png"}]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let film = fetch(&app, &format!("/api/v1/films/{id}")).await;
    assert_eq!(film["seasons"].as_array().unwrap().len(), 1);
    assert_eq!(film["seasons"][0]["num"], 3);

    let response = send_json(app, Method::PUT, &uri, json!([{"num": 1, "banner": ""}])).await;
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

#[tokio::test]
async fn person_link_updates_both_documents() {
    let app = common::build_test_app();
    let film = create_film(&app, "Stalker").await;
    let person = create_person(&app, "Tarkovsky").await;
    let uri = format!("/api/v1/films/{film}/stuff/{person}");

    assert_eq!(send(app.clone(), Method::PUT, &uri).await.status(), StatusCode::OK);
    assert_eq!(fetch(&app, &format!("/api/v1/films/{film}")).await["stuff"], json!([person]));
    assert_eq!(fetch(&app, &format!("/api/v1/persons/{person}")).await["films"], json!([film]));

    assert_eq!(send(app.clone(), Method::DELETE, &uri).await.status(), StatusCode::OK);
    assert_eq!(fetch(&app, &format!("/api/v1/persons/{person}")).await["films"], json!([]));

    let response = send(app, Method::PUT, &format!("/api/v1/films/{film}/stuff/ghost")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "LINK_FAILED");
}

#[tokio::test]
async fn related_films_are_symmetric() {
    let app = common::build_test_app();
    let a = create_film(&app, "A").await;
    let b = create_film(&app, "B").await;

    let response = send(app.clone(), Method::PUT, &format!("/api/v1/films/{a}/related/{b}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(fetch(&app, &format!("/api/v1/films/{a}")).await["related_films"], json!([b]));
    assert_eq!(fetch(&app, &format!("/api/v1/films/{b}")).await["related_films"], json!([a]));

    let ghost = format!("/api/v1/films/{a}/related/ghost");
    let response = send(app.clone(), Method::PUT, &ghost).await;
    assert_eq!(body_json(response).await["code"], "LINK_FAILED");

    let response = send(app.clone(), Method::PUT, &format!("/api/v1/films/{a}/related/{a}")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response =
        send(app.clone(), Method::DELETE, &format!("/api/v1/films/{b}/related/{a}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(fetch(&app, &format!("/api/v1/films/{a}")).await["related_films"], json!([]));
}

// ---------------------------------------------------------------------------
// Delete cascade
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_prunes_every_reference() {
    let app = common::build_test_app();
    let film = create_film(&app, "Stalker").await;
    let other = create_film(&app, "Solaris").await;
    let person = create_person(&app, "Tarkovsky").await;

    send(app.clone(), Method::PUT, &format!("/api/v1/films/{film}/related/{other}")).await;
    send(app.clone(), Method::PUT, &format!("/api/v1/films/{film}/stuff/{person}")).await;
    let censor = common::create(
        &app,
        "/api/v1/censors",
        json!({"name": "Top", "films": [other, film]}),
    )
    .await;
    let selection = common::create(
        &app,
        "/api/v1/selections",
        json!({"name": "Classics", "films": [film]}),
    )
    .await;

    let response = send(app.clone(), Method::DELETE, &format!("/api/v1/films/{film}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await["data"].clone();
    assert_eq!(report["deleted"], true);
    assert_eq!(report["sweeps"].as_array().unwrap().len(), 4);
    assert_eq!(report["sweeps"][0]["status"], "cleaned");

    assert_eq!(fetch(&app, &format!("/api/v1/films/{other}")).await["related_films"], json!([]));
    assert_eq!(fetch(&app, &format!("/api/v1/censors/{censor}")).await["films"], json!([other]));
    assert_eq!(fetch(&app, &format!("/api/v1/selections/{selection}")).await["films"], json!([]));
    assert_eq!(fetch(&app, &format!("/api/v1/persons/{person}")).await["films"], json!([]));

    let response = send(app, Method::DELETE, &format!("/api/v1/films/{film}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Engagement shortcuts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn counters_and_score() {
    let app = common::build_test_app();
    let id = create_film(&app, "Stalker").await;
    let put = |path: &str| {
        let app = app.clone();
        let uri = format!("/api/v1/films/{id}/{path}");
        async move { send(app, Method::PUT, &uri).await.status() }
    };

    assert_eq!(put("view").await, StatusCode::OK);
    assert_eq!(put("will-watch").await, StatusCode::OK);
    assert_eq!(put("will-not-watch").await, StatusCode::OK);
    assert_eq!(put("will-not-watch").await, StatusCode::BAD_REQUEST);
    assert_eq!(put("score/4").await, StatusCode::OK);
    assert_eq!(put("score/2").await, StatusCode::OK);
    assert_eq!(put("score/9").await, StatusCode::BAD_REQUEST);

    let film = fetch(&app, &format!("/api/v1/films/{id}")).await;
    assert_eq!(film["view_count"], 1);
    assert_eq!(film["will_watch_count"], 0);
    assert_eq!(film["score_count"], 2);
    assert_eq!(film["score"], 3.0);
}
