//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches
//!
//! Wire-facing types serialize with camelCase field names to match the
//! public API contract.

pub mod admin;
pub mod application;
