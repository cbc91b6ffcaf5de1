//! Film service endpoints.
//!
//! JSON mirror of the `FilmServiceProto` contract: each call names a film
//! and answers `{"success": bool}` with status 200. A missing film or a
//! rejected mutation is `false`, not an error; only store failures map to
//! error statuses.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use catalog_core::types::DbId;

use crate::error::AppResult;
use crate::interactor::FilmInteractor;
use crate::state::AppState;

/// Request naming a single film.
#[derive(Debug, Deserialize)]
pub struct FilmRequest {
    pub film_id: DbId,
}

/// Rating request.
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub film_id: DbId,
    pub score: u32,
}

/// Reply of every film service call.
#[derive(Debug, Serialize)]
pub struct ServiceReply {
    pub success: bool,
}

fn reply(operation: &'static str, film_id: &str, success: bool) -> Json<ServiceReply> {
    tracing::debug!(operation, %film_id, success, "Film service call");
    Json(ServiceReply { success })
}

// ---------------------------------------------------------------------------
// POST /film-service/score
// ---------------------------------------------------------------------------

pub async fn score(
    State(state): State<AppState>,
    Json(req): Json<ScoreRequest>,
) -> AppResult<Json<ServiceReply>> {
    let success = FilmInteractor::add_score(&state.db, &req.film_id, req.score).await?;
    Ok(reply("score", &req.film_id, success))
}

// ---------------------------------------------------------------------------
// POST /film-service/{incr,decr}-*
// ---------------------------------------------------------------------------

pub async fn incr_views_count(
    State(state): State<AppState>,
    Json(req): Json<FilmRequest>,
) -> AppResult<Json<ServiceReply>> {
    let success = FilmInteractor::incr_views_count(&state.db, &req.film_id).await?;
    Ok(reply("incr_views_count", &req.film_id, success))
}

pub async fn incr_share_count(
    State(state): State<AppState>,
    Json(req): Json<FilmRequest>,
) -> AppResult<Json<ServiceReply>> {
    let success = FilmInteractor::incr_share_count(&state.db, &req.film_id).await?;
    Ok(reply("incr_share_count", &req.film_id, success))
}

pub async fn incr_watched_count(
    State(state): State<AppState>,
    Json(req): Json<FilmRequest>,
) -> AppResult<Json<ServiceReply>> {
    let success = FilmInteractor::incr_watched_count(&state.db, &req.film_id).await?;
    Ok(reply("incr_watched_count", &req.film_id, success))
}

pub async fn decr_watched_count(
    State(state): State<AppState>,
    Json(req): Json<FilmRequest>,
) -> AppResult<Json<ServiceReply>> {
    let success = FilmInteractor::decr_watched_count(&state.db, &req.film_id).await?;
    Ok(reply("decr_watched_count", &req.film_id, success))
}

pub async fn incr_will_watch_count(
    State(state): State<AppState>,
    Json(req): Json<FilmRequest>,
) -> AppResult<Json<ServiceReply>> {
    let success = FilmInteractor::incr_will_watch_count(&state.db, &req.film_id).await?;
    Ok(reply("incr_will_watch_count", &req.film_id, success))
}

pub async fn decr_will_watch_count(
    State(state): State<AppState>,
    Json(req): Json<FilmRequest>,
) -> AppResult<Json<ServiceReply>> {
    let success = FilmInteractor::decr_will_watch_count(&state.db, &req.film_id).await?;
    Ok(reply("decr_will_watch_count", &req.film_id, success))
}

pub async fn incr_not_interesting_count(
    State(state): State<AppState>,
    Json(req): Json<FilmRequest>,
) -> AppResult<Json<ServiceReply>> {
    let success = FilmInteractor::incr_not_interesting_count(&state.db, &req.film_id).await?;
    Ok(reply("incr_not_interesting_count", &req.film_id, success))
}

pub async fn decr_not_interesting_count(
    State(state): State<AppState>,
    Json(req): Json<FilmRequest>,
) -> AppResult<Json<ServiceReply>> {
    let success = FilmInteractor::decr_not_interesting_count(&state.db, &req.film_id).await?;
    Ok(reply("decr_not_interesting_count", &req.film_id, success))
}
