//! Game template entity model.

use gamehub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A game-type template row from the `game_templates` table.
///
/// Read-only from the game modules' perspective; rows are seeded by
/// migration, one per game type, and looked up by slug.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GameTemplate {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub created_at: Timestamp,
}
