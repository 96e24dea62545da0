//! Game entity model and DTOs.

use gamehub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A game row from the `games` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Game {
    pub id: DbId,
    /// Globally unique across all game types.
    pub name: String,
    pub description: String,
    pub creator_id: DbId,
    pub game_template_id: DbId,
    /// Blob-store path of the thumbnail, if one was uploaded.
    pub thumbnail_image: Option<String>,
    pub is_published: bool,
    /// Per-type payload; shape is selected by the template slug.
    pub game_json: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A game joined with its template's slug, as fetched by the service's
/// type-check step.
#[derive(Debug, Clone, FromRow)]
pub struct GameWithTemplate {
    #[sqlx(flatten)]
    pub game: Game,
    pub template_slug: String,
}

/// DTO for inserting a new game. The id is generated by the service
/// before the thumbnail upload, not by the database.
#[derive(Debug, Clone)]
pub struct CreateGame {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub creator_id: DbId,
    pub game_template_id: DbId,
    pub thumbnail_image: Option<String>,
    pub game_json: serde_json::Value,
}

/// DTO for patching a game. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdateGame {
    pub name: Option<String>,
    pub description: Option<String>,
    pub thumbnail_image: Option<String>,
    pub game_json: Option<serde_json::Value>,
}

impl UpdateGame {
    /// Whether the patch changes anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.thumbnail_image.is_none()
            && self.game_json.is_none()
    }
}
