//! Shared test harness: router construction and HTTP helpers.
//!
//! `build_test_app` mirrors the router construction in `main.rs` so
//! integration tests exercise the same middleware stack (CORS, request ID,
//! timeout, body limit, panic recovery) that production uses.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use sevadesk_api::auth::jwt::{generate_token, JwtConfig};
use sevadesk_api::auth::password::hash_password;
use sevadesk_api::config::{ServerConfig, UploadConfig};
use sevadesk_api::router::build_app_router;
use sevadesk_api::state::AppState;
use sevadesk_db::models::admin::{Admin, CreateAdmin};
use sevadesk_db::repositories::AdminRepo;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uploads land in a shared directory under the system temp dir; stored
/// filenames carry millisecond timestamps, so tests do not collide.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_days: 30,
        },
        uploads: UploadConfig {
            dir: std::env::temp_dir().join("sevadesk-api-tests"),
            max_bytes: 10 * 1024 * 1024,
            max_attachments: 5,
        },
        bootstrap_admin: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create an administrator directly in the database and return the row
/// plus the plaintext password used.
pub async fn create_test_admin(pool: &PgPool, email: &str, role: &str) -> (Admin, String) {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let input = CreateAdmin {
        name: "Test Admin".to_string(),
        email: email.to_string(),
        password_hash: hashed,
        phone: "+91 00000 00000".to_string(),
        profile_image: String::new(),
        role: role.to_string(),
    };
    let admin = AdminRepo::create(pool, &input)
        .await
        .expect("admin creation should succeed");
    (admin, password.to_string())
}

/// Create an admin-role administrator and mint a bearer token for it,
/// signed with the test JWT secret.
pub async fn seed_admin_token(pool: &PgPool) -> String {
    let (admin, _password) = create_test_admin(pool, "ops@agency.test", "admin").await;
    generate_token(admin.id, &admin.role, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, path: &str, json: serde_json::Value) -> Response<Body> {
    json_request(app, "POST", path, json, None).await
}

pub async fn post_json_auth(
    app: Router,
    path: &str,
    json: serde_json::Value,
    token: &str,
) -> Response<Body> {
    json_request(app, "POST", path, json, Some(token)).await
}

pub async fn patch_json(app: Router, path: &str, json: serde_json::Value) -> Response<Body> {
    json_request(app, "PATCH", path, json, None).await
}

pub async fn patch_json_auth(
    app: Router,
    path: &str,
    json: serde_json::Value,
    token: &str,
) -> Response<Body> {
    json_request(app, "PATCH", path, json, Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    path: &str,
    json: serde_json::Value,
    token: &str,
) -> Response<Body> {
    json_request(app, "PUT", path, json, Some(token)).await
}

pub async fn delete_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn json_request(
    app: Router,
    method: &str,
    path: &str,
    json: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(json.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart helpers
// ---------------------------------------------------------------------------

pub const MULTIPART_BOUNDARY: &str = "sevadesk-test-boundary";

/// Build a `multipart/form-data` body from text fields and files.
///
/// Files are `(original_filename, content_type, bytes)` triples sent under
/// the `documents` field name.
pub fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (filename, content_type, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"documents\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

/// POST a multipart submission to the given path.
pub async fn post_multipart(app: Router, path: &str, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}
