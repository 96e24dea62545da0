//! Health check handler.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /health
///
/// Reports process liveness and database reachability. Unauthenticated.
pub async fn health_check(State(state): State<AppState>) -> AppResult<Json<Value>> {
    gamehub_db::health_check(&state.pool).await?;
    Ok(Json(json!({ "status": "ok" })))
}
