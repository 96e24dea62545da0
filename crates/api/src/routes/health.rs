//! Root-level health check route.

use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// Routes mounted at the application root.
///
/// ```text
/// GET /health -> health_check
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}
