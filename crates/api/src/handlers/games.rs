//! Generic handlers for the game-type modules.
//!
//! Every game type exposes the same four endpoints; the concrete
//! [`GameKind`] reaches these handlers through an `Extension` layer set
//! by the mounting router (see `routes::games`). Request bodies are
//! multipart/form-data: text fields plus an optional `thumbnail` file
//! part; the kind's payload list arrives in the field named by
//! [`GameKind::payload_field`].

use axum::extract::{Extension, Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use gamehub_core::error::CoreError;
use gamehub_core::games::payload::GamePayload;
use gamehub_core::games::GameKind;
use gamehub_core::types::DbId;
use gamehub_db::models::game::Game;
use gamehub_storage::UploadFile;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::services::games::{
    create_game, delete_game, game_detail, update_game, CreateGameInput, GameDetail,
    UpdateGameInput,
};
use crate::state::AppState;

/// Body of a successful DELETE response.
#[derive(Debug, Serialize)]
pub struct DeleteResult {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/games/{slug}
pub async fn create(
    State(state): State<AppState>,
    Extension(kind): Extension<GameKind>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<Game>>)> {
    let form = GameForm::read(kind, multipart).await?;

    let title = form.require_title()?;
    let payload_raw = form.payload_raw.as_deref().ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Field '{}' is required",
            kind.payload_field()
        )))
    })?;
    let payload = GamePayload::parse_client_field(kind, payload_raw)?;

    let input = CreateGameInput {
        title,
        description: form.description,
        thumbnail: form.thumbnail,
        payload,
    };

    let game = create_game(&state.pool, state.storage.as_ref(), kind, input, user.user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            StatusCode::CREATED,
            format!("{} game created successfully", kind.display_name()),
            game,
        )),
    ))
}

/// GET /api/v1/games/{slug}/{game_id}
pub async fn detail(
    State(state): State<AppState>,
    Extension(kind): Extension<GameKind>,
    user: AuthUser,
    Path(game_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<GameDetail>>> {
    let game = game_detail(&state.pool, kind, game_id, &user).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        format!("Get {} game successfully", kind.display_name()),
        game,
    )))
}

/// PATCH /api/v1/games/{slug}/{game_id}
pub async fn update(
    State(state): State<AppState>,
    Extension(kind): Extension<GameKind>,
    user: AuthUser,
    Path(game_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Game>>> {
    let form = GameForm::read(kind, multipart).await?;

    let title = match form.title {
        Some(title) if title.trim().is_empty() => {
            return Err(CoreError::Validation("Title is required".into()).into());
        }
        other => other,
    };
    let payload = match form.payload_raw.as_deref() {
        Some(raw) => Some(GamePayload::parse_client_field(kind, raw)?),
        None => None,
    };

    let input = UpdateGameInput {
        title,
        description: form.description,
        thumbnail: form.thumbnail,
        payload,
    };

    let game = update_game(
        &state.pool,
        state.storage.as_ref(),
        kind,
        game_id,
        input,
        &user,
    )
    .await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        format!("{} game updated successfully", kind.display_name()),
        game,
    )))
}

/// DELETE /api/v1/games/{slug}/{game_id}
pub async fn remove(
    State(state): State<AppState>,
    Extension(kind): Extension<GameKind>,
    user: AuthUser,
    Path(game_id): Path<DbId>,
) -> AppResult<Json<ApiResponse<DeleteResult>>> {
    delete_game(&state.pool, state.storage.as_ref(), kind, game_id, &user).await?;

    let message = format!("{} game deleted successfully", kind.display_name());
    Ok(Json(ApiResponse::new(
        StatusCode::OK,
        message.clone(),
        DeleteResult { message },
    )))
}

// ---------------------------------------------------------------------------
// Multipart form
// ---------------------------------------------------------------------------

/// Fields common to every game-type form. Unknown fields are ignored.
struct GameForm {
    title: Option<String>,
    description: Option<String>,
    thumbnail: Option<UploadFile>,
    /// Raw text of the kind's payload list field, parsed later with the
    /// string-or-array coercion.
    payload_raw: Option<String>,
}

impl GameForm {
    async fn read(kind: GameKind, mut multipart: Multipart) -> AppResult<GameForm> {
        let mut form = GameForm {
            title: None,
            description: None,
            thumbnail: None,
            payload_raw: None,
        };

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "title" => {
                    form.title = Some(read_text(field).await?);
                }
                "description" => {
                    form.description = Some(read_text(field).await?);
                }
                "thumbnail" => {
                    let filename = field.file_name().unwrap_or("thumbnail").to_string();
                    let content_type = field.content_type().map(|ct| ct.to_string());
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    form.thumbnail = Some(UploadFile {
                        filename,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
                f if f == kind.payload_field() => {
                    form.payload_raw = Some(read_text(field).await?);
                }
                _ => {} // ignore unknown fields
            }
        }

        Ok(form)
    }

    fn require_title(&self) -> AppResult<String> {
        match &self.title {
            Some(title) if !title.trim().is_empty() => Ok(title.clone()),
            _ => Err(CoreError::Validation("Title is required".into()).into()),
        }
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}
