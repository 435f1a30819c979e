//! Domain rules for the Sanse training planner.
//!
//! Everything here is storage-agnostic: identifiers, the error taxonomy and
//! the validation/derivation helpers shared by the persistence and HTTP
//! layers.

pub mod category;
pub mod error;
pub mod exercise;
pub mod roles;
pub mod training;
pub mod types;
pub mod user;
