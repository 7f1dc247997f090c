pub mod applications;
pub mod auth;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                      login (public)
/// /auth/me                         current profile (requires auth)
/// /auth/profile                    profile update (requires auth)
///
/// /applications                    submit (public, POST), list (admin, GET)
/// /applications/bulk-delete        bulk delete (admin, POST)
/// /applications/{id}/status        status transition (admin, PATCH)
/// /applications/{id}               edit (admin, PATCH), delete (admin, DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/applications", applications::router())
}
