//! Repository for the `storage_outbox` table.
//!
//! Entries are blob-removal intents. They are enqueued inside the same
//! transaction as the row change that makes the blob obsolete; the
//! service drains them only after that transaction commits.

use sqlx::{PgExecutor, PgPool};

use crate::models::outbox::StorageOutboxEntry;

const COLUMNS: &str = "id, path, queued_at";

pub struct OutboxRepo;

impl OutboxRepo {
    /// Queue a blob removal, returning the created entry.
    pub async fn enqueue<'e>(
        executor: impl PgExecutor<'e>,
        path: &str,
    ) -> Result<StorageOutboxEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO storage_outbox (path) VALUES ($1) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StorageOutboxEntry>(&query)
            .bind(path)
            .fetch_one(executor)
            .await
    }

    /// All queued removals, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<StorageOutboxEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM storage_outbox ORDER BY id ASC");
        sqlx::query_as::<_, StorageOutboxEntry>(&query)
            .fetch_all(pool)
            .await
    }

    /// Remove a completed entry. Returns `true` if a row was removed.
    pub async fn remove(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM storage_outbox WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
