//! Route definitions for the `/applications` resource.

use axum::routing::{patch, post};
use axum::Router;

use crate::handlers::applications;
use crate::state::AppState;

/// Routes mounted at `/applications`.
///
/// ```text
/// POST   /              -> submit (public)
/// GET    /              -> list (admin)
/// POST   /bulk-delete   -> bulk_delete (admin)
/// PATCH  /{id}/status   -> update_status (admin)
/// PATCH  /{id}          -> update_details (admin)
/// DELETE /{id}          -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(applications::submit).get(applications::list),
        )
        .route("/bulk-delete", post(applications::bulk_delete))
        .route("/{id}/status", patch(applications::update_status))
        .route(
            "/{id}",
            patch(applications::update_details).delete(applications::delete),
        )
}
