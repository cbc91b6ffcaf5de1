//! Route definitions for the `/censors` resource.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::censors;
use crate::state::AppState;

/// Routes mounted at `/censors`.
///
/// ```text
/// GET    /                              -> list_censors
/// POST   /                              -> create_censor
/// GET    /{id}                          -> get_censor
/// DELETE /{id}                          -> delete_censor
/// PUT    /{id}/name                     -> change_name
/// PUT    /{id}/films                    -> set_films
/// PUT    /{id}/films/{film_id}/{place}  -> add_film
/// DELETE /{id}/films/{film_id}          -> delete_film
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(censors::list_censors).post(censors::create_censor))
        .route(
            "/{id}",
            get(censors::get_censor).delete(censors::delete_censor),
        )
        .route("/{id}/name", put(censors::change_name))
        .route("/{id}/films", put(censors::set_films))
        .route("/{id}/films/{film_id}/{place}", put(censors::add_film))
        .route("/{id}/films/{film_id}", delete(censors::delete_film))
}
