//! Merge-patch field wrapper.
//!
//! A JSON update body distinguishes three states per field: the key is
//! missing, the key is `null`, or the key carries a value. Update DTOs mark
//! every `Patch` field `#[serde(default)]` so a missing key deserializes to
//! [`Patch::Absent`].

use serde::{Deserialize, Deserializer};

use crate::error::CoreError;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    /// Leave the stored value untouched.
    #[default]
    Absent,
    /// Clear the stored value.
    Null,
    /// Overwrite the stored value.
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Patch::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Absent => Patch::Absent,
            Patch::Null => Patch::Null,
            Patch::Value(value) => Patch::Value(f(value)),
        }
    }

    /// Resolve a patch for a field that cannot be cleared.
    ///
    /// `Absent` yields `Ok(None)`; `Null` is a validation error.
    pub fn required(self, field: &'static str) -> Result<Option<T>, CoreError> {
        match self {
            Patch::Absent => Ok(None),
            Patch::Null => Err(CoreError::Validation(format!(
                "Field '{field}' cannot be null"
            ))),
            Patch::Value(value) => Ok(Some(value)),
        }
    }

    /// Resolve a patch for a nullable field.
    ///
    /// The outer `Option` is "touch the field", the inner one its new value.
    pub fn nullable(self) -> Option<Option<T>> {
        match self {
            Patch::Absent => None,
            Patch::Null => Some(None),
            Patch::Value(value) => Some(Some(value)),
        }
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Patch::Value(value)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}
