//! Repository for the `games` table.

use gamehub_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::game::{CreateGame, Game, GameWithTemplate, UpdateGame};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, creator_id, game_template_id, \
                       thumbnail_image, is_published, game_json, created_at, updated_at";

/// Qualified variant for joined queries.
const G_COLUMNS: &str = "g.id, g.name, g.description, g.creator_id, g.game_template_id, \
                         g.thumbnail_image, g.is_published, g.game_json, g.created_at, g.updated_at";

/// Provides CRUD operations for games.
///
/// All methods take `impl PgExecutor<'_>` so the service layer can run a
/// whole operation's lookups and writes inside one transaction.
pub struct GameRepo;

impl GameRepo {
    /// Insert a new game, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateGame,
    ) -> Result<Game, sqlx::Error> {
        let query = format!(
            "INSERT INTO games (id, name, description, creator_id, game_template_id,
                                thumbnail_image, game_json)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.creator_id)
            .bind(input.game_template_id)
            .bind(&input.thumbnail_image)
            .bind(&input.game_json)
            .fetch_one(executor)
            .await
    }

    /// Find a game by ID together with its template's slug.
    pub async fn find_by_id_with_template<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<GameWithTemplate>, sqlx::Error> {
        let query = format!(
            "SELECT {G_COLUMNS}, gt.slug AS template_slug
             FROM games g
             JOIN game_templates gt ON gt.id = g.game_template_id
             WHERE g.id = $1"
        );
        sqlx::query_as::<_, GameWithTemplate>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Return the id of the game with the given (globally unique) name.
    pub async fn find_id_by_name<'e>(
        executor: impl PgExecutor<'e>,
        name: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM games WHERE name = $1")
            .bind(name)
            .fetch_optional(executor)
            .await
    }

    /// Patch a game. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateGame,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!(
            "UPDATE games SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                thumbnail_image = COALESCE($4, thumbnail_image),
                game_json = COALESCE($5, game_json),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.thumbnail_image)
            .bind(&input.game_json)
            .fetch_optional(executor)
            .await
    }

    /// Delete a game by ID. Returns `true` if a row was removed.
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
