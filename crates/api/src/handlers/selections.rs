//! Handlers for the `/selections` resource: named, unordered film sets.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use catalog_core::error::CoreError;
use catalog_db::models::selection::CreateSelection;
use catalog_db::repositories::SelectionRepo;

use crate::error::{ensure_applied, AppError, AppResult};
use crate::handlers::censors::{FilmsBody, NameBody};
use crate::query::PaginationParams;
use crate::response::{success, DataResponse};
use crate::state::AppState;

fn selection_not_found(id: String) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "FilmSelection",
        id,
    })
}

// ---------------------------------------------------------------------------
// GET|POST /selections
// ---------------------------------------------------------------------------

pub async fn list_selections(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let selections = SelectionRepo::list(&state.db, params.to_page()).await?;
    tracing::debug!(count = selections.len(), "Listed selections");
    Ok(Json(DataResponse { data: selections }))
}

pub async fn create_selection(
    State(state): State<AppState>,
    Json(input): Json<CreateSelection>,
) -> AppResult<impl IntoResponse> {
    let selection = SelectionRepo::create(&state.db, input)
        .await?
        .ok_or_else(|| AppError::NotApplied("One or more films do not exist".into()))?;
    tracing::info!(selection_id = %selection.id, "Selection created");
    Ok(Json(DataResponse { data: selection }))
}

// ---------------------------------------------------------------------------
// GET|DELETE /selections/{id}
// ---------------------------------------------------------------------------

pub async fn get_selection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let selection = SelectionRepo::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| selection_not_found(id))?;
    Ok(Json(DataResponse { data: selection }))
}

pub async fn delete_selection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    if !SelectionRepo::delete(&state.db, &id).await? {
        return Err(selection_not_found(id));
    }
    tracing::info!(selection_id = %id, "Selection deleted");
    Ok(success())
}

// ---------------------------------------------------------------------------
// PUT /selections/{id}/name
// ---------------------------------------------------------------------------

pub async fn change_name(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<NameBody>,
) -> AppResult<impl IntoResponse> {
    let changed = SelectionRepo::change_name(&state.db, &id, &body.name).await?;
    ensure_applied(changed, format!("Selection {id} was not renamed"))?;
    tracing::info!(selection_id = %id, name = %body.name, "Selection renamed");
    Ok(success())
}

// ---------------------------------------------------------------------------
// PUT /selections/{id}/films
// ---------------------------------------------------------------------------

pub async fn set_films(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<FilmsBody>,
) -> AppResult<impl IntoResponse> {
    let replaced = SelectionRepo::set_films(&state.db, &id, body.films).await?;
    ensure_applied(replaced, format!("Films of selection {id} were not replaced"))?;
    tracing::info!(selection_id = %id, "Selection films replaced");
    Ok(success())
}

// ---------------------------------------------------------------------------
// PUT|DELETE /selections/{id}/films/{film_id}
// ---------------------------------------------------------------------------

pub async fn add_film(
    State(state): State<AppState>,
    Path((id, film_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let added = SelectionRepo::add_film(&state.db, &id, &film_id).await?;
    ensure_applied(added, format!("Film {film_id} was not added"))?;
    tracing::info!(selection_id = %id, %film_id, "Film added to selection");
    Ok(success())
}

pub async fn delete_film(
    State(state): State<AppState>,
    Path((id, film_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let removed = SelectionRepo::delete_film(&state.db, &id, &film_id).await?;
    ensure_applied(removed, format!("Film {film_id} was not in the selection"))?;
    tracing::info!(selection_id = %id, %film_id, "Film removed from selection");
    Ok(success())
}
