pub mod censors;
pub mod film_service;
pub mod films;
pub mod health;
pub mod persons;
pub mod selections;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /films                                           list, create
/// /films/{id}                                      get, merge-patch, delete (+ sweeps)
/// /films/{id}/seasons                              replace seasons
/// /films/{id}/lists/{list}/{value}                 set-add, pull
/// /films/{id}/stuff/{person_id}                    link, unlink person
/// /films/{id}/related/{other_id}                   relate, unrelate film
/// /films/{id}/score/{score}                        rate
/// /films/{id}/{counter-shortcut}                   bump engagement counters
///
/// /persons                                         list, create
/// /persons/{id}                                    get, merge-patch, delete (+ sweep)
/// /persons/{id}/nominations/{nomination}           set-add, pull
/// /persons/{id}/films/{film_id}                    link, unlink film
///
/// /censors                                         list, create
/// /censors/{id}                                    get, delete
/// /censors/{id}/name                               rename
/// /censors/{id}/films                              replace ranked list
/// /censors/{id}/films/{film_id}/{place}            rank film
/// /censors/{id}/films/{film_id}                    unrank film
///
/// /selections                                      list, create
/// /selections/{id}                                 get, delete
/// /selections/{id}/name                            rename
/// /selections/{id}/films                           replace films
/// /selections/{id}/films/{film_id}                 add, remove film
///
/// /film-service/*                                  film service RPC mirror
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/films", films::router())
        .nest("/persons", persons::router())
        .nest("/censors", censors::router())
        .nest("/selections", selections::router())
        // Counter and score calls shaped after the film service contract.
        .nest("/film-service", film_service::router())
}
