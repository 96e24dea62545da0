//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as
//! production) on top of an in-memory blob store, and drives it with
//! `tower::ServiceExt::oneshot` -- no TCP listener involved.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use gamehub_api::auth::jwt::JwtConfig;
use gamehub_api::config::ServerConfig;
use gamehub_api::router::build_app_router;
use gamehub_api::state::AppState;
use gamehub_storage::memory::MemoryStorage;
use gamehub_storage::Storage;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage_root: "uploads".into(),
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router backed by an in-memory blob store.
///
/// Returns the storage handle alongside the router so tests can assert
/// which blobs exist after an operation. Clone the router for each
/// request (`app.clone().oneshot(..)` consumes it) so all requests in a
/// test share one blob store.
pub fn build_test_app(pool: PgPool) -> (Router, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage: storage.clone() as Arc<dyn Storage>,
    };

    (build_app_router(state, &config), storage)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a request with no body.
async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, token).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a multipart/form-data request built with [`MultipartForm`].
pub async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    form: MultipartForm,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, MultipartForm::content_type());
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(form.finish())).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Parse the response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart form builder
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "gamehub-test-boundary";

/// Incremental multipart/form-data body builder with a fixed boundary.
pub struct MultipartForm {
    body: Vec<u8>,
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartForm {
    pub fn new() -> Self {
        Self { body: Vec::new() }
    }

    pub fn content_type() -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

// ---------------------------------------------------------------------------
// Auth helpers
// ---------------------------------------------------------------------------

pub const TEST_PASSWORD: &str = "password123";

/// Register a user and return their access token.
///
/// Builds throwaway routers internally; the auth endpoints touch no blob
/// storage, so sharing the caller's storage handle is unnecessary.
pub async fn register_and_login(pool: &PgPool, username: &str, email: &str) -> String {
    let (app, _) = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/register",
        None,
        serde_json::json!({
            "username": username,
            "email": email,
            "password": TEST_PASSWORD,
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);

    login(pool, email).await
}

/// Log an existing user in and return their access token.
pub async fn login(pool: &PgPool, email: &str) -> String {
    let (app, _) = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/login",
        None,
        serde_json::json!({"email": email, "password": TEST_PASSWORD}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    let json = body_json(response).await;
    json["data"]["access_token"].as_str().unwrap().to_string()
}

/// Grant the super-admin role directly in the database.
///
/// Call before [`login`] -- the role is baked into the issued token.
pub async fn promote_to_super_admin(pool: &PgPool, email: &str) {
    sqlx::query("UPDATE users SET role = 'super_admin' WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await
        .unwrap();
}
