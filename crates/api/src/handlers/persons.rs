//! Handlers for the `/persons` resource.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use catalog_core::error::CoreError;
use catalog_db::models::person::{CreatePerson, UpdatePerson};
use catalog_db::repositories::PersonRepo;

use crate::error::{ensure_applied, ensure_linked, AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::{success, DataResponse};
use crate::state::AppState;

fn person_not_found(id: String) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Person",
        id,
    })
}

// ---------------------------------------------------------------------------
// GET /persons
// ---------------------------------------------------------------------------

pub async fn list_persons(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let persons = PersonRepo::list(&state.db, params.to_page()).await?;
    tracing::debug!(count = persons.len(), "Listed persons");
    Ok(Json(DataResponse { data: persons }))
}

// ---------------------------------------------------------------------------
// POST /persons
// ---------------------------------------------------------------------------

/// Create a person. Listed films must exist and get the new person added
/// to their `stuff`.
pub async fn create_person(
    State(state): State<AppState>,
    Json(input): Json<CreatePerson>,
) -> AppResult<impl IntoResponse> {
    let person = PersonRepo::create(&state.db, input).await?;
    tracing::info!(
        person_id = %person.id,
        films = person.films.len(),
        "Person created"
    );
    Ok(Json(DataResponse { data: person }))
}

// ---------------------------------------------------------------------------
// GET|PUT|DELETE /persons/{id}
// ---------------------------------------------------------------------------

pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let person = PersonRepo::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| person_not_found(id))?;
    Ok(Json(DataResponse { data: person }))
}

pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdatePerson>,
) -> AppResult<impl IntoResponse> {
    let updated = PersonRepo::update(&state.db, &id, input).await?;
    ensure_applied(updated, format!("Person {id} was not updated"))?;
    tracing::info!(person_id = %id, "Person updated");
    Ok(success())
}

/// Delete a person and pull its id from every film's `stuff`.
pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let report = PersonRepo::delete(&state.db, &id).await?;
    if !report.deleted {
        return Err(person_not_found(id));
    }
    tracing::info!(person_id = %id, "Person deleted");
    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// PUT|DELETE /persons/{id}/nominations/{nomination}
// ---------------------------------------------------------------------------

pub async fn add_nomination(
    State(state): State<AppState>,
    Path((id, nomination)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let added = PersonRepo::add_nomination(&state.db, &id, &nomination).await?;
    ensure_applied(added, format!("Nomination '{nomination}' was not added"))?;
    tracing::info!(person_id = %id, %nomination, "Nomination added");
    Ok(success())
}

pub async fn delete_nomination(
    State(state): State<AppState>,
    Path((id, nomination)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let removed = PersonRepo::delete_nomination(&state.db, &id, &nomination).await?;
    ensure_applied(removed, format!("Nomination '{nomination}' was not removed"))?;
    tracing::info!(person_id = %id, %nomination, "Nomination removed");
    Ok(success())
}

// ---------------------------------------------------------------------------
// PUT|DELETE /persons/{id}/films/{film_id}
// ---------------------------------------------------------------------------

pub async fn add_film(
    State(state): State<AppState>,
    Path((id, film_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    ensure_linked(PersonRepo::add_film(&state.db, &id, &film_id).await?)?;
    tracing::info!(person_id = %id, %film_id, "Film linked to person");
    Ok(success())
}

pub async fn delete_film(
    State(state): State<AppState>,
    Path((id, film_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    ensure_linked(PersonRepo::delete_film(&state.db, &id, &film_id).await?)?;
    tracing::info!(person_id = %id, %film_id, "Film unlinked from person");
    Ok(success())
}
