//! Route definitions for the `/selections` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::selections;
use crate::state::AppState;

/// Routes mounted at `/selections`.
///
/// ```text
/// GET    /                              -> list_selections
/// POST   /                              -> create_selection
/// GET    /{id}                          -> get_selection
/// DELETE /{id}                          -> delete_selection
/// PUT    /{id}/name                     -> change_name
/// PUT    /{id}/films                    -> set_films
/// PUT    /{id}/films/{film_id}          -> add_film
/// DELETE /{id}/films/{film_id}          -> delete_film
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(selections::list_selections).post(selections::create_selection),
        )
        .route(
            "/{id}",
            get(selections::get_selection).delete(selections::delete_selection),
        )
        .route("/{id}/name", put(selections::change_name))
        .route("/{id}/films", put(selections::set_films))
        .route(
            "/{id}/films/{film_id}",
            put(selections::add_film).delete(selections::delete_film),
        )
}
