//! Handlers for the `/auth` resource (login, profile).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use sevadesk_core::error::CoreError;
use sevadesk_db::models::admin::{AdminProfile, UpdateAdminProfile};
use sevadesk_db::repositories::AdminRepo;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication payload: a bearer token plus the profile.
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub token: String,
    pub admin: AdminProfile,
}

/// Request body for `PUT /auth/profile`.
///
/// Patch-by-presence; a present, non-empty `password` replaces the stored
/// credential (re-hashed before persisting, never stored in plaintext).
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub profile_image: Option<String>,
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. An unknown email and a wrong
/// password produce the identical 401 message, so callers cannot probe
/// which administrator accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthPayload>>> {
    let admin = AdminRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    let token = generate_token(admin.id, &admin.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(admin_id = admin.id, "Admin logged in");

    Ok(Json(ApiResponse::new(AuthPayload {
        token,
        admin: AdminProfile::from(&admin),
    })))
}

/// GET /api/v1/auth/me
///
/// Profile of the authenticated administrator.
pub async fn me(
    State(state): State<AppState>,
    auth: AuthAdmin,
) -> AppResult<Json<ApiResponse<AdminProfile>>> {
    let admin = AdminRepo::find_by_id(&state.pool, auth.admin_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Admin",
            id: auth.admin_id,
        }))?;

    Ok(Json(ApiResponse::new(AdminProfile::from(&admin))))
}

/// PUT /api/v1/auth/profile
///
/// Self-service profile update. Returns the fresh profile together with a
/// newly issued token, since the email embedded in the old login may have
/// changed.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthAdmin,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<AuthPayload>>> {
    let password_hash = match input.password.filter(|p| !p.is_empty()) {
        Some(password) => Some(
            hash_password(&password)
                .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
        ),
        None => None,
    };

    let patch = UpdateAdminProfile {
        name: input.name.filter(|s| !s.is_empty()),
        email: input.email.filter(|s| !s.is_empty()),
        phone: input.phone.filter(|s| !s.is_empty()),
        profile_image: input.profile_image.filter(|s| !s.is_empty()),
        password_hash,
    };

    let admin = AdminRepo::update_profile(&state.pool, auth.admin_id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Admin",
            id: auth.admin_id,
        }))?;

    let token = generate_token(admin.id, &admin.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(admin_id = admin.id, "Admin profile updated");

    Ok(Json(ApiResponse::new(AuthPayload {
        token,
        admin: AdminProfile::from(&admin),
    })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The uniform login failure. Deliberately does not say which check failed.
fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}
