//! User entity model and DTOs.

use gamehub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A user row from the `users` table.
///
/// `password_hash` is deliberately skipped during serialization so entity
/// structs can be returned from handlers directly.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user. The password is hashed before this point.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}
