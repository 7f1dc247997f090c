//! Well-known role name constants.
//!
//! These must match the values stored in the `admins.role` column and the
//! role claim embedded in access tokens.

pub const ROLE_ADMIN: &str = "admin";
