//! Storage outbox entry model.

use gamehub_core::types::Timestamp;
use sqlx::FromRow;

/// A queued blob-removal intent from the `storage_outbox` table.
#[derive(Debug, Clone, FromRow)]
pub struct StorageOutboxEntry {
    pub id: i64,
    pub path: String,
    pub queued_at: Timestamp,
}
