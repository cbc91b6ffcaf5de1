use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Referenced documents that must exist before a write do not.
    #[error("Referenced ids do not exist: {}", describe_missing(.persons, .films))]
    MissingReferences { persons: Vec<DbId>, films: Vec<DbId> },

    #[error("Internal error: {0}")]
    Internal(String),
}

fn describe_missing(persons: &[DbId], films: &[DbId]) -> String {
    [("person", persons), ("film", films)]
        .iter()
        .filter(|(_, ids)| !ids.is_empty())
        .map(|(entity, ids)| format!("{entity} [{}]", ids.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}
