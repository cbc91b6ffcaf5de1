pub mod censors;
pub mod film_service;
pub mod films;
pub mod persons;
pub mod selections;
