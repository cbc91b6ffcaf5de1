//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async operations that
//! accept `&Db` as the first argument. Operations that only touch the store
//! return `StoreError`; those that also validate input or referenced ids
//! return [`RepoError`].

use catalog_core::error::CoreError;

use crate::store::StoreError;

mod links;

pub mod censor_repo;
pub mod film_repo;
pub mod person_repo;
pub mod selection_repo;

pub use censor_repo::CensorRepo;
pub use film_repo::FilmRepo;
pub use person_repo::PersonRepo;
pub use selection_repo::SelectionRepo;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
