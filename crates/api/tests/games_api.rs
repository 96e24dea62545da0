//! HTTP-level integration tests for the game-type CRUD endpoints.
//!
//! Focused on the Flip Tiles module; the quiz routes double as the
//! "wrong module" counterpart since all game types share the same
//! handlers.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, build_test_app, delete, get, login, promote_to_super_admin, register_and_login,
    send_multipart, MultipartForm,
};
use sqlx::PgPool;

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn two_tiles() -> String {
    serde_json::json!([
        {"label": "Cat", "color": "#ff0000"},
        {"label": "Dog", "color": "#00ff00"},
    ])
    .to_string()
}

fn flip_tiles_form(title: &str) -> MultipartForm {
    MultipartForm::new()
        .text("title", title)
        .text("description", "Match the animals")
        .text("tiles", &two_tiles())
        .file("thumbnail", "thumb.png", "image/png", PNG_BYTES)
}

async fn game_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM games")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_flip_tiles_game_returns_201(pool: PgPool) {
    let token = register_and_login(&pool, "alice", "alice@example.com").await;
    let (app, storage) = build_test_app(pool.clone());

    let response = send_multipart(
        app,
        Method::POST,
        "/api/v1/games/flip-tiles",
        Some(&token),
        flip_tiles_form("Quiz Night"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], 201);
    assert_eq!(json["message"], "Flip Tiles game created successfully");
    assert_eq!(json["data"]["name"], "Quiz Night");
    assert_eq!(json["data"]["description"], "Match the animals");
    assert!(json["data"]["id"].is_string());

    // Exactly one blob, stored under the game's namespace.
    let game_id = json["data"]["id"].as_str().unwrap();
    assert_eq!(storage.len(), 1);
    let path = &storage.paths()[0];
    assert!(path.starts_with(&format!("game/flip-tiles/{game_id}/")));
    assert_eq!(json["data"]["thumbnail_image"].as_str().unwrap(), path);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_with_duplicate_title_returns_400(pool: PgPool) {
    let token = register_and_login(&pool, "alice", "alice@example.com").await;
    let (app, storage) = build_test_app(pool.clone());

    let first = send_multipart(
        app.clone(),
        Method::POST,
        "/api/v1/games/flip-tiles",
        Some(&token),
        flip_tiles_form("Quiz Night"),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = send_multipart(
        app,
        Method::POST,
        "/api/v1/games/flip-tiles",
        Some(&token),
        flip_tiles_form("Quiz Night"),
    )
    .await;

    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let json = body_json(second).await;
    assert_eq!(json["message"], "Game name is already used");

    // The rejected create left no row and no blob behind.
    assert_eq!(game_count(&pool).await, 1);
    assert_eq!(storage.len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_with_single_tile_returns_400(pool: PgPool) {
    let token = register_and_login(&pool, "alice", "alice@example.com").await;
    let (app, storage) = build_test_app(pool.clone());

    let form = MultipartForm::new()
        .text("title", "Lonely Tile")
        .text("tiles", r##"[{"label": "Cat", "color": "#ff0000"}]"##)
        .file("thumbnail", "thumb.png", "image/png", PNG_BYTES);

    let response = send_multipart(
        app,
        Method::POST,
        "/api/v1/games/flip-tiles",
        Some(&token),
        form,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "At least 2 tiles are required");
    assert_eq!(game_count(&pool).await, 0);
    assert!(storage.is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_without_thumbnail_returns_400(pool: PgPool) {
    let token = register_and_login(&pool, "alice", "alice@example.com").await;
    let (app, _) = build_test_app(pool.clone());

    let form = MultipartForm::new()
        .text("title", "No Thumb")
        .text("tiles", &two_tiles());

    let response = send_multipart(
        app,
        Method::POST,
        "/api/v1/games/flip-tiles",
        Some(&token),
        form,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Thumbnail is required");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_without_tiles_field_returns_400(pool: PgPool) {
    let token = register_and_login(&pool, "alice", "alice@example.com").await;
    let (app, _) = build_test_app(pool.clone());

    let form = MultipartForm::new()
        .text("title", "No Tiles")
        .file("thumbnail", "thumb.png", "image/png", PNG_BYTES);

    let response = send_multipart(
        app,
        Method::POST,
        "/api/v1/games/flip-tiles",
        Some(&token),
        form,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Field 'tiles' is required");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_accepts_string_encoded_tiles(pool: PgPool) {
    let token = register_and_login(&pool, "alice", "alice@example.com").await;
    let (app, _) = build_test_app(pool.clone());

    // Tiles sent as a JSON string containing the array, as some form
    // clients double-encode list fields.
    let double_encoded = serde_json::Value::String(two_tiles()).to_string();
    let form = MultipartForm::new()
        .text("title", "String Tiles")
        .text("tiles", &double_encoded)
        .file("thumbnail", "thumb.png", "image/png", PNG_BYTES);

    let response = send_multipart(
        app,
        Method::POST,
        "/api/v1/games/flip-tiles",
        Some(&token),
        form,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_without_token_returns_401(pool: PgPool) {
    let (app, storage) = build_test_app(pool.clone());

    let response = send_multipart(
        app,
        Method::POST,
        "/api/v1/games/flip-tiles",
        None,
        flip_tiles_form("Anonymous"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(storage.is_empty());
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// Create a flip-tiles game and return its id.
async fn create_game(app: axum::Router, token: &str, title: &str) -> String {
    let response = send_multipart(
        app,
        Method::POST,
        "/api/v1/games/flip-tiles",
        Some(token),
        flip_tiles_form(title),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_str().unwrap().to_string()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_detail_round_trips_tile_order(pool: PgPool) {
    let token = register_and_login(&pool, "alice", "alice@example.com").await;
    let (app, _) = build_test_app(pool.clone());
    let game_id = create_game(app.clone(), &token, "Ordered").await;

    let response = get(
        app,
        &format!("/api/v1/games/flip-tiles/{game_id}"),
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Get Flip Tiles game successfully");
    assert_eq!(json["data"]["title"], "Ordered");

    let labels: Vec<&str> = json["data"]["tiles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Cat", "Dog"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_detail_via_wrong_module_returns_400(pool: PgPool) {
    let token = register_and_login(&pool, "alice", "alice@example.com").await;
    let (app, _) = build_test_app(pool.clone());
    let game_id = create_game(app.clone(), &token, "Flippy").await;

    // The game exists, but it is not a quiz.
    let response = get(app, &format!("/api/v1/games/quiz/{game_id}"), Some(&token)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Game is not a Quiz game");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_detail_by_non_owner_returns_403(pool: PgPool) {
    let owner = register_and_login(&pool, "alice", "alice@example.com").await;
    let intruder = register_and_login(&pool, "bob", "bob@example.com").await;
    let (app, _) = build_test_app(pool.clone());
    let game_id = create_game(app.clone(), &owner, "Private").await;

    let response = get(
        app,
        &format!("/api/v1/games/flip-tiles/{game_id}"),
        Some(&intruder),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "You are not authorized to access this game"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_detail_by_super_admin_succeeds(pool: PgPool) {
    let owner = register_and_login(&pool, "alice", "alice@example.com").await;
    register_and_login(&pool, "root", "root@example.com").await;
    promote_to_super_admin(&pool, "root@example.com").await;
    let admin = login(&pool, "root@example.com").await;

    let (app, _) = build_test_app(pool.clone());
    let game_id = create_game(app.clone(), &owner, "Shared").await;

    let response = get(
        app,
        &format!("/api/v1/games/flip-tiles/{game_id}"),
        Some(&admin),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_detail_of_missing_game_returns_404(pool: PgPool) {
    let token = register_and_login(&pool, "alice", "alice@example.com").await;
    let (app, _) = build_test_app(pool.clone());

    let response = get(
        app,
        &format!("/api/v1/games/flip-tiles/{}", uuid::Uuid::new_v4()),
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_description_only_leaves_other_fields(pool: PgPool) {
    let token = register_and_login(&pool, "alice", "alice@example.com").await;
    let (app, storage) = build_test_app(pool.clone());
    let game_id = create_game(app.clone(), &token, "Stable").await;

    let form = MultipartForm::new().text("description", "New words");
    let response = send_multipart(
        app.clone(),
        Method::PATCH,
        &format!("/api/v1/games/flip-tiles/{game_id}"),
        Some(&token),
        form,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Flip Tiles game updated successfully");
    assert_eq!(json["data"]["name"], "Stable");
    assert_eq!(json["data"]["description"], "New words");

    // Thumbnail untouched.
    assert_eq!(storage.len(), 1);

    let detail = get(
        app,
        &format!("/api/v1/games/flip-tiles/{game_id}"),
        Some(&token),
    )
    .await;
    let json = body_json(detail).await;
    assert_eq!(json["data"]["tiles"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_thumbnail_replaces_old_blob(pool: PgPool) {
    let token = register_and_login(&pool, "alice", "alice@example.com").await;
    let (app, storage) = build_test_app(pool.clone());
    let game_id = create_game(app.clone(), &token, "Re-skinned").await;
    let old_path = storage.paths()[0].clone();

    let form = MultipartForm::new().file("thumbnail", "fresh.png", "image/png", PNG_BYTES);
    let response = send_multipart(
        app,
        Method::PATCH,
        &format!("/api/v1/games/flip-tiles/{game_id}"),
        Some(&token),
        form,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let new_path = json["data"]["thumbnail_image"].as_str().unwrap();

    assert_ne!(new_path, old_path);
    assert_eq!(storage.len(), 1);
    assert!(storage.contains(new_path));
    assert!(!storage.contains(&old_path));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_with_no_fields_returns_unchanged_game(pool: PgPool) {
    let token = register_and_login(&pool, "alice", "alice@example.com").await;
    let (app, storage) = build_test_app(pool.clone());
    let game_id = create_game(app.clone(), &token, "Untouched").await;
    let thumbnail_path = storage.paths()[0].clone();

    let response = send_multipart(
        app,
        Method::PATCH,
        &format!("/api/v1/games/flip-tiles/{game_id}"),
        Some(&token),
        MultipartForm::new(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Untouched");
    assert_eq!(json["data"]["description"], "Match the animals");
    assert_eq!(json["data"]["thumbnail_image"], thumbnail_path.as_str());
    assert_eq!(storage.len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_with_empty_title_returns_400(pool: PgPool) {
    let token = register_and_login(&pool, "alice", "alice@example.com").await;
    let (app, _) = build_test_app(pool.clone());
    let game_id = create_game(app.clone(), &token, "Named").await;

    let form = MultipartForm::new().text("title", "   ");
    let response = send_multipart(
        app,
        Method::PATCH,
        &format!("/api/v1/games/flip-tiles/{game_id}"),
        Some(&token),
        form,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Title is required");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_by_non_owner_returns_403(pool: PgPool) {
    let owner = register_and_login(&pool, "alice", "alice@example.com").await;
    let intruder = register_and_login(&pool, "bob", "bob@example.com").await;
    let (app, _) = build_test_app(pool.clone());
    let game_id = create_game(app.clone(), &owner, "Guarded").await;

    let form = MultipartForm::new().text("description", "hijack");
    let response = send_multipart(
        app,
        Method::PATCH,
        &format!("/api/v1/games/flip-tiles/{game_id}"),
        Some(&intruder),
        form,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "You are not authorized to update this game"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_of_missing_game_returns_404(pool: PgPool) {
    let token = register_and_login(&pool, "alice", "alice@example.com").await;
    let (app, _) = build_test_app(pool.clone());

    let form = MultipartForm::new().text("description", "ghost");
    let response = send_multipart(
        app,
        Method::PATCH,
        &format!("/api/v1/games/flip-tiles/{}", uuid::Uuid::new_v4()),
        Some(&token),
        form,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_removes_game_and_blob(pool: PgPool) {
    let token = register_and_login(&pool, "alice", "alice@example.com").await;
    let (app, storage) = build_test_app(pool.clone());
    let game_id = create_game(app.clone(), &token, "Doomed").await;
    assert_eq!(storage.len(), 1);

    let response = delete(
        app.clone(),
        &format!("/api/v1/games/flip-tiles/{game_id}"),
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Flip Tiles game deleted successfully");
    assert_eq!(json["data"]["message"], "Flip Tiles game deleted successfully");

    assert!(storage.is_empty());
    assert_eq!(game_count(&pool).await, 0);

    // Subsequent GET should 404.
    let response = get(
        app,
        &format!("/api/v1/games/flip-tiles/{game_id}"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_after_thumbnail_replacement_removes_latest_blob(pool: PgPool) {
    let token = register_and_login(&pool, "alice", "alice@example.com").await;
    let (app, storage) = build_test_app(pool.clone());
    let game_id = create_game(app.clone(), &token, "Short-lived").await;

    let form = MultipartForm::new().file("thumbnail", "second.png", "image/png", PNG_BYTES);
    let response = send_multipart(
        app.clone(),
        Method::PATCH,
        &format!("/api/v1/games/flip-tiles/{game_id}"),
        Some(&token),
        form,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let replacement_path = json["data"]["thumbnail_image"].as_str().unwrap().to_string();
    assert!(storage.contains(&replacement_path));

    let response = delete(
        app,
        &format!("/api/v1/games/flip-tiles/{game_id}"),
        Some(&token),
    )
    .await;

    // The delete must chase the replacement blob, not the original path.
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!storage.contains(&replacement_path));
    assert!(storage.is_empty());
    assert_eq!(game_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_by_non_owner_returns_403(pool: PgPool) {
    let owner = register_and_login(&pool, "alice", "alice@example.com").await;
    let intruder = register_and_login(&pool, "bob", "bob@example.com").await;
    let (app, storage) = build_test_app(pool.clone());
    let game_id = create_game(app.clone(), &owner, "Protected").await;

    let response = delete(
        app,
        &format!("/api/v1/games/flip-tiles/{game_id}"),
        Some(&intruder),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "You are not authorized to delete this game"
    );
    assert_eq!(game_count(&pool).await, 1);
    assert_eq!(storage.len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_by_super_admin_succeeds(pool: PgPool) {
    let owner = register_and_login(&pool, "alice", "alice@example.com").await;
    register_and_login(&pool, "root", "root@example.com").await;
    promote_to_super_admin(&pool, "root@example.com").await;
    let admin = login(&pool, "root@example.com").await;

    let (app, storage) = build_test_app(pool.clone());
    let game_id = create_game(app.clone(), &owner, "Moderated").await;

    let response = delete(
        app,
        &format!("/api/v1/games/flip-tiles/{game_id}"),
        Some(&admin),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(storage.is_empty());
}

// ---------------------------------------------------------------------------
// Sibling modules
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_quiz_game(pool: PgPool) {
    let token = register_and_login(&pool, "alice", "alice@example.com").await;
    let (app, _) = build_test_app(pool.clone());

    let questions = serde_json::json!([
        {"question": "2+2?", "options": ["3", "4"], "answer_index": 1},
    ])
    .to_string();
    let form = MultipartForm::new()
        .text("title", "Math Quiz")
        .text("questions", &questions)
        .file("thumbnail", "thumb.png", "image/png", PNG_BYTES);

    let response = send_multipart(app, Method::POST, "/api/v1/games/quiz", Some(&token), form).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Quiz game created successfully");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_anagram_game(pool: PgPool) {
    let token = register_and_login(&pool, "alice", "alice@example.com").await;
    let (app, _) = build_test_app(pool.clone());

    let words = serde_json::json!([{"word": "listen", "hint": "silent"}]).to_string();
    let form = MultipartForm::new()
        .text("title", "Word Scramble")
        .text("words", &words)
        .file("thumbnail", "thumb.png", "image/png", PNG_BYTES);

    let response = send_multipart(
        app,
        Method::POST,
        "/api/v1/games/anagram",
        Some(&token),
        form,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Anagram game created successfully");
}
