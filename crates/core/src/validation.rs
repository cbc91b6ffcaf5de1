//! Field validation helpers shared by entity constructors.

use crate::error::CoreError;

/// Fail when `value` is empty or whitespace only.
pub fn require_non_empty(entity: &str, field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "Field '{field}' of {entity} must not be empty"
        )));
    }
    Ok(())
}

/// Fail when any item of a string list is empty.
pub fn require_no_empty_items(
    entity: &str,
    field: &str,
    items: &[String],
) -> Result<(), CoreError> {
    if items.iter().any(|item| item.trim().is_empty()) {
        return Err(CoreError::Validation(format!(
            "List '{field}' of {entity} contains an empty item"
        )));
    }
    Ok(())
}

/// Return the ids from `wanted` that are not in `existing`, in request order
/// and without duplicates.
pub fn missing_ids(wanted: &[String], existing: &[String]) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for id in wanted {
        if !existing.contains(id) && !missing.contains(id) {
            missing.push(id.clone());
        }
    }
    missing
}
