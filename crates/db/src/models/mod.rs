//! Entity documents and their create/update DTOs.
//!
//! Create DTOs convert into entities through explicit `into_*` constructors
//! that run the construction rules; update DTOs produce a [`ChangeSet`]
//! of the fields to merge into the stored document.

pub mod censor;
pub mod change_set;
pub mod film;
pub mod outcome;
pub mod person;
pub mod selection;

pub use change_set::ChangeSet;
