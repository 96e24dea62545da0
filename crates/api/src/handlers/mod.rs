//! HTTP request handlers.

pub mod auth;
pub mod games;
pub mod health;
