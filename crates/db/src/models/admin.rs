//! Administrator entity model and DTOs.

use serde::Serialize;
use sevadesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full administrator row from the `admins` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Use [`AdminProfile`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub profile_image: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe administrator representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub profile_image: String,
    pub role: String,
}

impl From<&Admin> for AdminProfile {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            name: admin.name.clone(),
            email: admin.email.clone(),
            phone: admin.phone.clone(),
            profile_image: admin.profile_image.clone(),
            role: admin.role.clone(),
        }
    }
}

/// DTO for creating an administrator. The password is already hashed by
/// the caller; plaintext never reaches this layer.
#[derive(Debug, Clone)]
pub struct CreateAdmin {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub profile_image: String,
    pub role: String,
}

/// DTO for the profile self-update. `None` fields are untouched;
/// `password_hash` is set only when the plaintext password was replaced.
#[derive(Debug, Clone, Default)]
pub struct UpdateAdminProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub profile_image: Option<String>,
    pub password_hash: Option<String>,
}
