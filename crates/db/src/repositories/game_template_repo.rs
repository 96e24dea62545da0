//! Repository for the `game_templates` table.

use sqlx::PgExecutor;

use crate::models::game_template::GameTemplate;

const COLUMNS: &str = "id, slug, name, created_at";

/// Read-only access to game-type templates (rows are seeded by migration).
pub struct GameTemplateRepo;

impl GameTemplateRepo {
    /// Find a template by its slug.
    pub async fn find_by_slug<'e>(
        executor: impl PgExecutor<'e>,
        slug: &str,
    ) -> Result<Option<GameTemplate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM game_templates WHERE slug = $1");
        sqlx::query_as::<_, GameTemplate>(&query)
            .bind(slug)
            .fetch_optional(executor)
            .await
    }
}
