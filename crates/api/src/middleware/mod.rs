//! Access control middleware.
//!
//! Implemented as Axum extractors so protected handlers declare their
//! requirement in the signature and rejected requests never reach the
//! handler body.

pub mod auth;
pub mod rbac;
