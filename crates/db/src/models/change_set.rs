//! Builder for merge-patch updates.

use catalog_core::error::CoreError;
use catalog_core::patch::Patch;
use serde::Serialize;
use serde_json::Value;

use crate::store::{Document, Update};

/// Top-level fields to overwrite in one document.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChangeSet {
    fields: Document,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field unconditionally.
    pub fn set<T: Serialize>(&mut self, field: &str, value: T) -> Result<(), CoreError> {
        let value = serde_json::to_value(value)
            .map_err(|e| CoreError::Internal(format!("cannot encode field '{field}': {e}")))?;
        self.fields.insert(field.to_string(), value);
        Ok(())
    }

    /// Record a field that cannot be cleared. `Null` is rejected.
    pub fn required<T: Serialize>(
        &mut self,
        field: &'static str,
        patch: Patch<T>,
    ) -> Result<(), CoreError> {
        match patch.required(field)? {
            Some(value) => self.set(field, value),
            None => Ok(()),
        }
    }

    /// Record a nullable field. `Null` stores JSON `null`.
    pub fn nullable<T: Serialize>(&mut self, field: &str, patch: Patch<T>) -> Result<(), CoreError> {
        match patch.nullable() {
            Some(Some(value)) => self.set(field, value),
            Some(None) => {
                self.fields.insert(field.to_string(), Value::Null);
                Ok(())
            }
            None => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &Document {
        &self.fields
    }

    pub fn into_update(self) -> Update {
        Update::Set(self.fields)
    }
}
