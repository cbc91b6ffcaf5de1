//! Handlers for the `/films` resource.
//!
//! Besides CRUD this covers the value lists, the two-sided person and
//! related-film links, season replacement and the per-film engagement
//! shortcuts backed by [`FilmInteractor`].

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use catalog_core::error::CoreError;
use catalog_core::film::{Counter, FilmList};
use catalog_db::models::film::{CreateFilm, Film, SeasonInput, UpdateFilm};
use catalog_db::repositories::FilmRepo;

use crate::error::{ensure_applied, ensure_linked, AppError, AppResult};
use crate::interactor::FilmInteractor;
use crate::query::PaginationParams;
use crate::response::{success, DataResponse, SuccessResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn film_not_found(id: String) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Film", id })
}

fn parse_list(name: &str) -> AppResult<FilmList> {
    FilmList::parse(name)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown film list '{name}'")))
}

// ---------------------------------------------------------------------------
// GET /films
// ---------------------------------------------------------------------------

pub async fn list_films(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let films = FilmRepo::list(&state.db, params.to_page()).await?;
    tracing::debug!(count = films.len(), "Listed films");
    Ok(Json(DataResponse { data: films }))
}

// ---------------------------------------------------------------------------
// POST /films
// ---------------------------------------------------------------------------

/// Create a film. Every person in `stuff` and every film in
/// `related_films` must already exist.
pub async fn create_film(
    State(state): State<AppState>,
    Json(input): Json<CreateFilm>,
) -> AppResult<impl IntoResponse> {
    let film = FilmRepo::create(&state.db, input).await?;
    tracing::info!(film_id = %film.id, name = %film.name, "Film created");
    Ok(Json(DataResponse { data: film }))
}

// ---------------------------------------------------------------------------
// GET /films/{id}
// ---------------------------------------------------------------------------

pub async fn get_film(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Film>>> {
    let film = FilmRepo::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| film_not_found(id))?;
    Ok(Json(DataResponse { data: film }))
}

// ---------------------------------------------------------------------------
// PUT /films/{id}
// ---------------------------------------------------------------------------

/// Merge-patch a film.
pub async fn update_film(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateFilm>,
) -> AppResult<impl IntoResponse> {
    let updated = FilmRepo::update(&state.db, &id, input).await?;
    ensure_applied(updated, format!("Film {id} was not updated"))?;
    tracing::info!(film_id = %id, "Film updated");
    Ok(success())
}

// ---------------------------------------------------------------------------
// DELETE /films/{id}
// ---------------------------------------------------------------------------

/// Delete a film and prune its id everywhere. Responds with the sweep
/// report so callers can see which cleanups failed.
pub async fn delete_film(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let report = FilmRepo::delete(&state.db, &id).await?;
    if !report.deleted {
        return Err(film_not_found(id));
    }
    let failed = report.failed_sweeps().count();
    tracing::info!(film_id = %id, failed_sweeps = failed, "Film deleted");
    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// PUT /films/{id}/seasons
// ---------------------------------------------------------------------------

/// Replace the whole seasons list.
pub async fn update_seasons(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(seasons): Json<Vec<SeasonInput>>,
) -> AppResult<impl IntoResponse> {
    let count = seasons.len();
    let updated = FilmRepo::update_seasons(&state.db, &id, seasons).await?;
    ensure_applied(updated, format!("Seasons of film {id} were not updated"))?;
    tracing::info!(film_id = %id, seasons = count, "Film seasons replaced");
    Ok(success())
}

// ---------------------------------------------------------------------------
// PUT|DELETE /films/{id}/lists/{list}/{value}
// ---------------------------------------------------------------------------

pub async fn add_list_value(
    State(state): State<AppState>,
    Path((id, list, value)): Path<(String, String, String)>,
) -> AppResult<impl IntoResponse> {
    let list = parse_list(&list)?;
    let added = FilmRepo::add_to_list(&state.db, &id, list, &value).await?;
    ensure_applied(added, format!("'{value}' was not added to {}", list.field()))?;
    tracing::info!(film_id = %id, list = list.field(), %value, "Film list value added");
    Ok(success())
}

pub async fn delete_list_value(
    State(state): State<AppState>,
    Path((id, list, value)): Path<(String, String, String)>,
) -> AppResult<impl IntoResponse> {
    let list = parse_list(&list)?;
    let removed = FilmRepo::delete_from_list(&state.db, &id, list, &value).await?;
    ensure_applied(removed, format!("'{value}' was not removed from {}", list.field()))?;
    tracing::info!(film_id = %id, list = list.field(), %value, "Film list value removed");
    Ok(success())
}

// ---------------------------------------------------------------------------
// PUT|DELETE /films/{id}/stuff/{person_id}
// ---------------------------------------------------------------------------

pub async fn add_person(
    State(state): State<AppState>,
    Path((id, person_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    ensure_linked(FilmRepo::add_person(&state.db, &id, &person_id).await?)?;
    tracing::info!(film_id = %id, %person_id, "Person linked to film");
    Ok(success())
}

pub async fn delete_person(
    State(state): State<AppState>,
    Path((id, person_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    ensure_linked(FilmRepo::delete_person(&state.db, &id, &person_id).await?)?;
    tracing::info!(film_id = %id, %person_id, "Person unlinked from film");
    Ok(success())
}

// ---------------------------------------------------------------------------
// PUT|DELETE /films/{id}/related/{other_id}
// ---------------------------------------------------------------------------

pub async fn add_related(
    State(state): State<AppState>,
    Path((id, other_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    ensure_linked(FilmRepo::add_related_film(&state.db, &id, &other_id).await?)?;
    tracing::info!(film_id = %id, %other_id, "Films related");
    Ok(success())
}

pub async fn delete_related(
    State(state): State<AppState>,
    Path((id, other_id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    ensure_linked(FilmRepo::delete_related_film(&state.db, &id, &other_id).await?)?;
    tracing::info!(film_id = %id, %other_id, "Films unrelated");
    Ok(success())
}

// ---------------------------------------------------------------------------
// PUT /films/{id}/score/{score} and counter shortcuts
// ---------------------------------------------------------------------------

pub async fn score(
    State(state): State<AppState>,
    Path((id, score)): Path<(String, u32)>,
) -> AppResult<impl IntoResponse> {
    let applied = FilmInteractor::add_score(&state.db, &id, score).await?;
    ensure_applied(applied, format!("Score {score} was not applied to film {id}"))?;
    tracing::debug!(film_id = %id, score, "Film scored");
    Ok(success())
}

async fn bump(
    state: &AppState,
    id: &str,
    counter: Counter,
    up: bool,
) -> AppResult<Json<DataResponse<SuccessResponse>>> {
    let applied = if up {
        FilmInteractor::incr(&state.db, id, counter).await?
    } else {
        FilmInteractor::decr(&state.db, id, counter).await?
    };
    ensure_applied(applied, format!("{} of film {id} was not changed", counter.field()))?;
    tracing::debug!(film_id = %id, counter = counter.field(), up, "Film counter changed");
    Ok(success())
}

pub async fn view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    bump(&state, &id, Counter::Views, true).await
}

pub async fn share(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    bump(&state, &id, Counter::Shares, true).await
}

pub async fn watched(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    bump(&state, &id, Counter::Watched, true).await
}

pub async fn unwatched(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    bump(&state, &id, Counter::Watched, false).await
}

pub async fn will_watch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    bump(&state, &id, Counter::WillWatch, true).await
}

pub async fn will_not_watch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    bump(&state, &id, Counter::WillWatch, false).await
}

pub async fn not_interesting(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    bump(&state, &id, Counter::NotInteresting, true).await
}

pub async fn interesting(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    bump(&state, &id, Counter::NotInteresting, false).await
}
