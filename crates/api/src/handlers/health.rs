//! Health check handler.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
///
/// Liveness plus a database round-trip. Always answers 200; a broken
/// database shows up as `db_healthy: false` so probes can distinguish
/// "process up" from "fully serving".
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let db_healthy = sevadesk_db::health_check(&state.pool).await.is_ok();

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "db_healthy": db_healthy,
    }))
}
