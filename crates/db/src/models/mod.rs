//! Row structs and request DTOs.

pub mod species;
pub mod vote;
