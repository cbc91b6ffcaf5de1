//! Route definitions for the `/persons` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::persons;
use crate::state::AppState;

/// Routes mounted at `/persons`.
///
/// ```text
/// GET    /                              -> list_persons
/// POST   /                              -> create_person
/// GET    /{id}                          -> get_person
/// PUT    /{id}                          -> update_person
/// DELETE /{id}                          -> delete_person
/// PUT    /{id}/nominations/{nomination} -> add_nomination
/// DELETE /{id}/nominations/{nomination} -> delete_nomination
/// PUT    /{id}/films/{film_id}          -> add_film
/// DELETE /{id}/films/{film_id}          -> delete_film
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(persons::list_persons).post(persons::create_person))
        .route(
            "/{id}",
            get(persons::get_person)
                .put(persons::update_person)
                .delete(persons::delete_person),
        )
        .route(
            "/{id}/nominations/{nomination}",
            put(persons::add_nomination).delete(persons::delete_nomination),
        )
        .route(
            "/{id}/films/{film_id}",
            put(persons::add_film).delete(persons::delete_film),
        )
}
