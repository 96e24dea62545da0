//! Route definitions for the game-list modules.
//!
//! Every game type shares the generic handlers in `handlers::games`;
//! each mounted sub-router injects its [`GameKind`] via an `Extension`
//! layer so the handlers know which module they serve.

use axum::extract::Extension;
use axum::routing::{get, post};
use axum::Router;
use gamehub_core::games::GameKind;

use crate::handlers::games;
use crate::state::AppState;

/// Routes mounted at `/games`, one sub-router per game type.
///
/// ```text
/// POST   /{slug}            -> create
/// GET    /{slug}/{game_id}  -> detail
/// PATCH  /{slug}/{game_id}  -> update
/// DELETE /{slug}/{game_id}  -> remove
/// ```
pub fn router() -> Router<AppState> {
    let mut router = Router::new();
    for kind in GameKind::ALL {
        router = router.nest(&format!("/{}", kind.slug()), game_type_router(*kind));
    }
    router
}

/// The four CRUD routes of one game-type module.
fn game_type_router(kind: GameKind) -> Router<AppState> {
    Router::new()
        .route("/", post(games::create))
        .route(
            "/{game_id}",
            get(games::detail)
                .patch(games::update)
                .delete(games::remove),
        )
        .layer(Extension(kind))
}
