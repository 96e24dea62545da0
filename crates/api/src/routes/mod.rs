pub mod auth;
pub mod games;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                     register (public)
/// /auth/login                        login (public)
/// /auth/me                           current user (requires auth)
///
/// /games/quiz                        create (requires auth)
/// /games/quiz/{game_id}              get, patch, delete
/// /games/flip-tiles                  create
/// /games/flip-tiles/{game_id}        get, patch, delete
/// /games/speed-sorting               ...
/// /games/anagram                     ...
/// /games/pair-or-no-pair             ...
/// /games/type-speed                  ...
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/games", games::router())
}
