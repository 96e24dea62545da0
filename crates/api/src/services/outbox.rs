//! Drains queued blob removals from the `storage_outbox` table.
//!
//! Entries are written inside game transactions (see
//! [`super::games`]) and applied here after commit. A removal that fails
//! stays queued and is retried on the next drain; the startup
//! reconciliation pass in `main` picks up anything a crashed process
//! left behind.

use gamehub_db::repositories::OutboxRepo;
use gamehub_db::DbPool;
use gamehub_storage::{Storage, StorageError};

/// Apply all queued blob removals. Never fails the caller: problems are
/// logged and the affected entries stay queued.
pub async fn drain(pool: &DbPool, storage: &dyn Storage) {
    let entries = match OutboxRepo::list(pool).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read storage outbox");
            return;
        }
    };

    for entry in entries {
        match storage.remove(&entry.path).await {
            // A missing blob means the removal already happened; the
            // entry is complete either way.
            Ok(()) | Err(StorageError::NotFound(_)) => {
                if let Err(e) = OutboxRepo::remove(pool, entry.id).await {
                    tracing::error!(
                        entry_id = entry.id,
                        error = %e,
                        "Failed to clear completed outbox entry"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    entry_id = entry.id,
                    path = %entry.path,
                    error = %e,
                    "Blob removal failed; entry stays queued"
                );
            }
        }
    }
}
