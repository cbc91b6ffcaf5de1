//! Pure domain logic for the film catalog.
//!
//! Everything in this crate is free of I/O: identifiers, the error
//! taxonomy, int-coded enumerations, engagement counters and the
//! merge-patch wrapper used by update DTOs.

#[macro_use]
mod code_enum;

pub mod error;
pub mod film;
pub mod patch;
pub mod person;
pub mod types;
pub mod validation;
