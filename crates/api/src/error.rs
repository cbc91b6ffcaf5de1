use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_core::error::CoreError;
use catalog_db::models::outcome::LinkOutcome;
use catalog_db::repositories::RepoError;
use catalog_db::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for document
/// store failures, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `catalog_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A document store error from `catalog_db`.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The operation found nothing to change (missing document, unknown
    /// reference, or value already in the requested state).
    #[error("Not applied: {0}")]
    NotApplied(String),

    /// A two-sided link or unlink that did not update both documents.
    #[error("Link not completed: {0:?}")]
    Link(LinkOutcome),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Core(core) => AppError::Core(core),
            RepoError::Store(store) => AppError::Store(store),
        }
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Turn a repository's "was anything changed" flag into a result.
pub fn ensure_applied(applied: bool, message: impl Into<String>) -> AppResult<()> {
    if applied {
        Ok(())
    } else {
        Err(AppError::NotApplied(message.into()))
    }
}

/// Turn a link outcome into a result; only `BothUpdated` succeeds.
pub fn ensure_linked(outcome: LinkOutcome) -> AppResult<()> {
    if outcome.is_success() {
        Ok(())
    } else {
        Err(AppError::Link(outcome))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::MissingReferences { .. } => (
                    StatusCode::BAD_REQUEST,
                    "MISSING_REFERENCES",
                    core.to_string(),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- HTTP-specific errors ---
            AppError::NotApplied(msg) => (StatusCode::BAD_REQUEST, "NOT_APPLIED", msg.clone()),
            AppError::Link(outcome) => match outcome {
                LinkOutcome::FirstOnly => (
                    StatusCode::BAD_REQUEST,
                    "PARTIAL_LINK",
                    "Only the first document was updated".to_string(),
                ),
                _ => (
                    StatusCode::BAD_REQUEST,
                    "LINK_FAILED",
                    "Link was not applied".to_string(),
                ),
            },
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - `Cancelled` maps to 503: the server is shutting down.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::Cancelled => (
            StatusCode::SERVICE_UNAVAILABLE,
            "CANCELLED",
            "The operation was cancelled".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Store error");
            internal()
        }
    }
}
