//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A write DTO carrying already-validated field values
//!
//! Entities serialize in camelCase; columns stay snake_case.

pub mod category;
pub mod exercise;
pub mod training;
pub mod user;
