//! Route definitions for the `/film-service` RPC mirror.

use axum::routing::post;
use axum::Router;

use crate::handlers::film_service;
use crate::state::AppState;

/// Routes mounted at `/film-service`. Every call is a `POST` with a JSON
/// body and answers `{"success": bool}`.
///
/// ```text
/// POST /incr-views-count            {film_id}
/// POST /incr-share-count            {film_id}
/// POST /incr-watched-count          {film_id}
/// POST /decr-watched-count          {film_id}
/// POST /incr-will-watch-count       {film_id}
/// POST /decr-will-watch-count       {film_id}
/// POST /incr-not-interesting-count  {film_id}
/// POST /decr-not-interesting-count  {film_id}
/// POST /score                       {film_id, score}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/incr-views-count", post(film_service::incr_views_count))
        .route("/incr-share-count", post(film_service::incr_share_count))
        .route("/incr-watched-count", post(film_service::incr_watched_count))
        .route("/decr-watched-count", post(film_service::decr_watched_count))
        .route(
            "/incr-will-watch-count",
            post(film_service::incr_will_watch_count),
        )
        .route(
            "/decr-will-watch-count",
            post(film_service::decr_will_watch_count),
        )
        .route(
            "/incr-not-interesting-count",
            post(film_service::incr_not_interesting_count),
        )
        .route(
            "/decr-not-interesting-count",
            post(film_service::decr_not_interesting_count),
        )
        .route("/score", post(film_service::score))
}
