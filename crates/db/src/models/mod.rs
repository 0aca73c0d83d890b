//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO for partial updates

pub mod project;
pub mod task;
pub mod user;
