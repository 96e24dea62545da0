//! HTTP transport and service layer for the gamehub backend.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
