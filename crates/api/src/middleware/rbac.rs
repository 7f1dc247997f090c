//! Role guard layered on top of [`AuthAdmin`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sevadesk_core::error::CoreError;
use sevadesk_core::roles::ROLE_ADMIN;

use super::auth::AuthAdmin;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden when the caller
/// is authenticated but carries a different role (distinct from the 401
/// an invalid token produces).
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     // admin is guaranteed to hold the admin role here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthAdmin);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let admin = AuthAdmin::from_request_parts(parts, state).await?;
        if admin.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(admin))
    }
}
