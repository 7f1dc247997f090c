//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod admin_repo;
pub mod application_repo;

pub use admin_repo::AdminRepo;
pub use application_repo::ApplicationRepo;
