//! Request handlers, one submodule per resource.
//!
//! Handlers validate input with `nexustrack_core::validation`, delegate to
//! the owner-scoped repositories in `nexustrack_db` and map errors via
//! [`AppError`].

pub mod auth;
pub mod project;
pub mod task;
pub mod user;

use nexustrack_core::types::DbId;

use crate::error::{AppError, AppResult};

/// Parse a path segment as a record id.
///
/// A malformed id cannot name an owned record, so it is reported as a 404
/// for `entity`, the same as a missing or foreign one.
pub(crate) fn parse_path_id(raw: &str, entity: &'static str) -> AppResult<DbId> {
    raw.parse().map_err(|_| AppError::not_found(entity))
}

/// Treat an empty or whitespace-only string as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
