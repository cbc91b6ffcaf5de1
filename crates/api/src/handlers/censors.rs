//! Handlers for the `/censors` resource: named, ranked top lists.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_db::models::censor::CreateCensor;
use catalog_db::repositories::CensorRepo;

use crate::error::{ensure_applied, AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::{success, DataResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of `PUT /censors/{id}/name` and `PUT /selections/{id}/name`.
#[derive(Debug, Deserialize)]
pub struct NameBody {
    pub name: String,
}

/// Body of a full film-list replace.
#[derive(Debug, Deserialize)]
pub struct FilmsBody {
    pub films: Vec<DbId>,
}

fn censor_not_found(id: String) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Censor",
        id,
    })
}

// ---------------------------------------------------------------------------
// GET /censors
// ---------------------------------------------------------------------------

pub async fn list_censors(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let censors = CensorRepo::list(&state.db, params.to_page()).await?;
    tracing::debug!(count = censors.len(), "Listed censors");
    Ok(Json(DataResponse { data: censors }))
}

// ---------------------------------------------------------------------------
// POST /censors
// ---------------------------------------------------------------------------

pub async fn create_censor(
    State(state): State<AppState>,
    Json(input): Json<CreateCensor>,
) -> AppResult<impl IntoResponse> {
    let censor = CensorRepo::create(&state.db, input)
        .await?
        .ok_or_else(|| AppError::NotApplied("One or more films do not exist".into()))?;
    tracing::info!(censor_id = %censor.id, films = censor.films.len(), "Censor created");
    Ok(Json(DataResponse { data: censor }))
}

// ---------------------------------------------------------------------------
// GET|DELETE /censors/{id}
// ---------------------------------------------------------------------------

pub async fn get_censor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let censor = CensorRepo::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| censor_not_found(id))?;
    Ok(Json(DataResponse { data: censor }))
}

pub async fn delete_censor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    if !CensorRepo::delete(&state.db, &id).await? {
        return Err(censor_not_found(id));
    }
    tracing::info!(censor_id = %id, "Censor deleted");
    Ok(success())
}

// ---------------------------------------------------------------------------
// PUT /censors/{id}/name
// ---------------------------------------------------------------------------

pub async fn change_name(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<NameBody>,
) -> AppResult<impl IntoResponse> {
    let changed = CensorRepo::change_name(&state.db, &id, &body.name).await?;
    ensure_applied(changed, format!("Censor {id} was not renamed"))?;
    tracing::info!(censor_id = %id, name = %body.name, "Censor renamed");
    Ok(success())
}

// ---------------------------------------------------------------------------
// PUT /censors/{id}/films
// ---------------------------------------------------------------------------

/// Replace the ranked list. Every film must exist.
pub async fn set_films(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<FilmsBody>,
) -> AppResult<impl IntoResponse> {
    let count = body.films.len();
    let replaced = CensorRepo::set_films_top(&state.db, &id, body.films).await?;
    ensure_applied(replaced, format!("Top list of censor {id} was not replaced"))?;
    tracing::info!(censor_id = %id, films = count, "Censor top list replaced");
    Ok(success())
}

// ---------------------------------------------------------------------------
// PUT /censors/{id}/films/{film_id}/{place}
// ---------------------------------------------------------------------------

/// Insert or move a film to a 1-based place in the ranking.
pub async fn add_film(
    State(state): State<AppState>,
    Path((id, film_id, place)): Path<(String, String, usize)>,
) -> AppResult<impl IntoResponse> {
    let added = CensorRepo::add_film(&state.db, &id, &film_id, place).await?;
    ensure_applied(added, format!("Film {film_id} was not ranked"))?;
    tracing::info!(censor_id = %id, %film_id, place, "Film ranked");
    Ok(success())
}

// ---------------------------------------------------------------------------
// DELETE /censors/{id}/films/{film_id}
// ---------------------------------------------------------------------------

pub async fn delete_film(
    State(state): State<AppState>,
    Path((id, film_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let removed = CensorRepo::delete_film(&state.db, &id, &film_id).await?;
    ensure_applied(removed, format!("Film {film_id} was not in the top list"))?;
    tracing::info!(censor_id = %id, %film_id, "Film removed from top list");
    Ok(success())
}
