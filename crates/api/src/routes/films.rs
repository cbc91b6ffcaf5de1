//! Route definitions for the `/films` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::films;
use crate::state::AppState;

/// Routes mounted at `/films`.
///
/// ```text
/// GET    /                              -> list_films (?limit, offset, page)
/// POST   /                              -> create_film
/// GET    /{id}                          -> get_film
/// PUT    /{id}                          -> update_film
/// DELETE /{id}                          -> delete_film
/// PUT    /{id}/seasons                  -> update_seasons
/// PUT    /{id}/lists/{list}/{value}     -> add_list_value
/// DELETE /{id}/lists/{list}/{value}     -> delete_list_value
/// PUT    /{id}/stuff/{person_id}        -> add_person
/// DELETE /{id}/stuff/{person_id}        -> delete_person
/// PUT    /{id}/related/{other_id}       -> add_related
/// DELETE /{id}/related/{other_id}       -> delete_related
/// PUT    /{id}/score/{score}            -> score
/// PUT    /{id}/view                     -> view
/// PUT    /{id}/share                    -> share
/// PUT    /{id}/watched                  -> watched
/// PUT    /{id}/unwatched                -> unwatched
/// PUT    /{id}/will-watch               -> will_watch
/// PUT    /{id}/will-not-watch           -> will_not_watch
/// PUT    /{id}/not-interesting          -> not_interesting
/// PUT    /{id}/interesting              -> interesting
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(films::list_films).post(films::create_film))
        .route(
            "/{id}",
            get(films::get_film)
                .put(films::update_film)
                .delete(films::delete_film),
        )
        .route("/{id}/seasons", put(films::update_seasons))
        .route(
            "/{id}/lists/{list}/{value}",
            put(films::add_list_value).delete(films::delete_list_value),
        )
        .route(
            "/{id}/stuff/{person_id}",
            put(films::add_person).delete(films::delete_person),
        )
        .route(
            "/{id}/related/{other_id}",
            put(films::add_related).delete(films::delete_related),
        )
        .route("/{id}/score/{score}", put(films::score))
        .route("/{id}/view", put(films::view))
        .route("/{id}/share", put(films::share))
        .route("/{id}/watched", put(films::watched))
        .route("/{id}/unwatched", put(films::unwatched))
        .route("/{id}/will-watch", put(films::will_watch))
        .route("/{id}/will-not-watch", put(films::will_not_watch))
        .route("/{id}/not-interesting", put(films::not_interesting))
        .route("/{id}/interesting", put(films::interesting))
}
