//! Well-known role name constants.
//!
//! These must match the seed data in `0001_create_users.sql`.

/// May read, update, and delete any game regardless of ownership.
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// Default role for registered users; owns only the games it created.
pub const ROLE_CREATOR: &str = "creator";
