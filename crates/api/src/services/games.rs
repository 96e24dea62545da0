//! Generic CRUD-with-ownership service shared by every game-type module.
//!
//! Each operation runs its lookups, checks, and writes in one database
//! transaction. Blob-store calls cannot join that transaction, so the
//! service keeps the two sides consistent with two rules:
//!
//! - uploads happen before commit, and a failed commit triggers a
//!   compensating `remove` of the fresh blob;
//! - removals are never issued mid-transaction -- the intent is queued in
//!   `storage_outbox` within the transaction and drained after commit
//!   (see [`super::outbox`]), so a crash cannot lose it.

use gamehub_core::error::CoreError;
use gamehub_core::games::payload::GamePayload;
use gamehub_core::games::GameKind;
use gamehub_core::types::DbId;
use gamehub_db::models::game::{CreateGame, Game, GameWithTemplate, UpdateGame};
use gamehub_db::repositories::{GameRepo, GameTemplateRepo, OutboxRepo};
use gamehub_db::DbPool;
use gamehub_storage::{Storage, UploadFile};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::services::outbox;

/// Input for [`create_game`], assembled by the handler from the validated
/// request form.
#[derive(Debug)]
pub struct CreateGameInput {
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<UploadFile>,
    pub payload: GamePayload,
}

/// Input for [`update_game`]. Every field is optional; only provided
/// fields are applied.
#[derive(Debug, Default)]
pub struct UpdateGameInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<UploadFile>,
    pub payload: Option<GamePayload>,
}

/// Projection of a game for detail responses.
#[derive(Debug, Serialize)]
pub struct GameDetail {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub thumbnail_image: Option<String>,
    pub is_published: bool,
    /// Flattened per-type payload (`tiles`, `questions`, ...), defaulting
    /// to an empty list when the stored JSON lacks it.
    #[serde(flatten)]
    pub payload: GamePayload,
}

/// Create a new game of the given kind owned by `creator_id`.
///
/// Fails with 400 on a duplicate name or missing thumbnail, and 404 when
/// the kind's template row is missing (a deployment error).
pub async fn create_game(
    pool: &DbPool,
    storage: &dyn Storage,
    kind: GameKind,
    input: CreateGameInput,
    creator_id: DbId,
) -> AppResult<Game> {
    let mut tx = pool.begin().await?;

    if GameRepo::find_id_by_name(&mut *tx, &input.title)
        .await?
        .is_some()
    {
        return Err(CoreError::Validation("Game name is already used".into()).into());
    }

    let template = GameTemplateRepo::find_by_slug(&mut *tx, kind.slug())
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("{} game template not found", kind.display_name()))
        })?;

    let thumbnail = input
        .thumbnail
        .ok_or_else(|| AppError::Core(CoreError::Validation("Thumbnail is required".into())))?;

    // The id is generated before the upload so the storage path is
    // namespaced by the final game id.
    let game_id = Uuid::new_v4();
    let thumbnail_path = storage
        .upload(&kind.storage_prefix(game_id), thumbnail)
        .await?;

    let created = GameRepo::create(
        &mut *tx,
        &CreateGame {
            id: game_id,
            name: input.title,
            description: input.description.unwrap_or_default(),
            creator_id,
            game_template_id: template.id,
            thumbnail_image: Some(thumbnail_path.clone()),
            game_json: payload_json(&input.payload)?,
        },
    )
    .await;

    let committed = match created {
        Ok(game) => tx.commit().await.map(|()| game).map_err(AppError::from),
        Err(e) => Err(e.into()),
    };

    match committed {
        Ok(game) => {
            tracing::info!(game_id = %game.id, kind = kind.slug(), "Game created");
            Ok(game)
        }
        Err(e) => {
            // The row never became visible; drop the fresh blob.
            if let Err(remove_err) = storage.remove(&thumbnail_path).await {
                tracing::warn!(
                    path = %thumbnail_path,
                    error = %remove_err,
                    "Failed to remove thumbnail after rolled-back create"
                );
            }
            Err(e)
        }
    }
}

/// Fetch a game of the given kind for its creator or a super-admin.
pub async fn game_detail(
    pool: &DbPool,
    kind: GameKind,
    game_id: DbId,
    user: &AuthUser,
) -> AppResult<GameDetail> {
    let fetched = GameRepo::find_by_id_with_template(pool, game_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Game",
            id: game_id,
        }))?;

    ensure_kind(kind, &fetched)?;
    ensure_owner_or_super_admin(&fetched.game, user, "access")?;

    let payload = GamePayload::from_stored(kind, &fetched.game.game_json);
    Ok(GameDetail {
        id: fetched.game.id,
        title: fetched.game.name,
        description: fetched.game.description,
        thumbnail_image: fetched.game.thumbnail_image,
        is_published: fetched.game.is_published,
        payload,
    })
}

/// Apply a partial update to a game of the given kind.
///
/// A new thumbnail replaces the old blob: the old path is queued for
/// removal inside the transaction and the new file uploaded before
/// commit, so the row never points at a deleted blob.
pub async fn update_game(
    pool: &DbPool,
    storage: &dyn Storage,
    kind: GameKind,
    game_id: DbId,
    input: UpdateGameInput,
    user: &AuthUser,
) -> AppResult<Game> {
    let mut tx = pool.begin().await?;

    let fetched = GameRepo::find_by_id_with_template(&mut *tx, game_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Game",
            id: game_id,
        }))?;

    ensure_kind(kind, &fetched)?;
    ensure_owner_or_super_admin(&fetched.game, user, "update")?;

    let mut patch = UpdateGame {
        name: input.title,
        description: input.description,
        ..UpdateGame::default()
    };
    if let Some(payload) = &input.payload {
        patch.game_json = Some(payload_json(payload)?);
    }

    let mut uploaded: Option<String> = None;
    if let Some(file) = input.thumbnail {
        if let Some(old_path) = &fetched.game.thumbnail_image {
            OutboxRepo::enqueue(&mut *tx, old_path).await?;
        }
        let path = storage.upload(&kind.storage_prefix(game_id), file).await?;
        patch.thumbnail_image = Some(path.clone());
        uploaded = Some(path);
    }

    // Nothing to apply: keep the row (and its updated_at) as-is.
    if patch.is_empty() {
        tx.commit().await?;
        return Ok(fetched.game);
    }

    let updated = GameRepo::update(&mut *tx, game_id, &patch).await;

    let committed = match updated {
        Ok(Some(game)) => tx.commit().await.map(|()| game).map_err(AppError::from),
        // The row was visible earlier in this transaction.
        Ok(None) => Err(AppError::Core(CoreError::NotFound {
            entity: "Game",
            id: game_id,
        })),
        Err(e) => Err(e.into()),
    };

    match committed {
        Ok(game) => {
            // Old blob removal was queued in the transaction; apply it now.
            outbox::drain(pool, storage).await;
            tracing::info!(game_id = %game.id, kind = kind.slug(), "Game updated");
            Ok(game)
        }
        Err(e) => {
            if let Some(path) = uploaded {
                if let Err(remove_err) = storage.remove(&path).await {
                    tracing::warn!(
                        path = %path,
                        error = %remove_err,
                        "Failed to remove thumbnail after rolled-back update"
                    );
                }
            }
            Err(e)
        }
    }
}

/// Delete a game of the given kind, including its thumbnail blob.
pub async fn delete_game(
    pool: &DbPool,
    storage: &dyn Storage,
    kind: GameKind,
    game_id: DbId,
    user: &AuthUser,
) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    let fetched = GameRepo::find_by_id_with_template(&mut *tx, game_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Game",
            id: game_id,
        }))?;

    ensure_kind(kind, &fetched)?;
    ensure_owner_or_super_admin(&fetched.game, user, "delete")?;

    if let Some(path) = &fetched.game.thumbnail_image {
        OutboxRepo::enqueue(&mut *tx, path).await?;
    }
    GameRepo::delete(&mut *tx, game_id).await?;

    tx.commit().await?;
    outbox::drain(pool, storage).await;

    tracing::info!(%game_id, kind = kind.slug(), "Game deleted");
    Ok(())
}

/// Reject games whose template slug does not match the operating module.
fn ensure_kind(kind: GameKind, fetched: &GameWithTemplate) -> AppResult<()> {
    if fetched.template_slug != kind.slug() {
        return Err(CoreError::Validation(format!(
            "Game is not a {} game",
            kind.display_name()
        ))
        .into());
    }
    Ok(())
}

/// Only the creator or a super-admin may operate on a game.
fn ensure_owner_or_super_admin(game: &Game, user: &AuthUser, action: &str) -> AppResult<()> {
    if !user.is_super_admin() && game.creator_id != user.user_id {
        return Err(CoreError::Forbidden(format!(
            "You are not authorized to {action} this game"
        ))
        .into());
    }
    Ok(())
}

fn payload_json(payload: &GamePayload) -> AppResult<serde_json::Value> {
    serde_json::to_value(payload)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize game payload: {e}")))
}
