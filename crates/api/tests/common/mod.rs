#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use pmtrack_api::auth::jwt::{generate_access_token, JwtConfig};
use pmtrack_api::config::ServerConfig;
use pmtrack_api::router::build_app_router;
use pmtrack_api::state::AppState;
use pmtrack_api::storage::LocalFileStorage;
use pmtrack_core::types::DbId;
use pmtrack_db::models::user::{CreateUser, User};
use pmtrack_db::repositories::UserRepo;
use pmtrack_events::ActivityNotifier;

const TEST_JWT_SECRET: &str = "test-secret-for-integration-tests";

/// Upload cap used by the test router: small enough to exceed cheaply.
pub const TEST_MAX_UPLOAD_BYTES: usize = 1024;

/// Test configuration. Each call gets its own storage directory.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage_root: std::env::temp_dir().join(format!("pmtrack-test-{}", uuid::Uuid::new_v4())),
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the application router exactly as `main.rs` does, over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_notifier(pool.clone(), ActivityNotifier::postgres(pool))
}

/// Same as [`build_test_app`] but with activity rows going to `notifier`.
pub fn build_test_app_with_notifier(pool: PgPool, notifier: ActivityNotifier) -> Router {
    let config = test_config();
    let state = AppState {
        notifier,
        pool,
        storage: Arc::new(LocalFileStorage::new(config.storage_root.clone())),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Insert a user directly through the repository.
pub async fn create_user(pool: &PgPool, name: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        },
    )
    .await
    .expect("user creation should succeed")
}

/// A valid bearer token for `user_id`, signed with the test secret.
pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

fn authed(method: Method, uri: &str, token: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = authed(Method::GET, uri, token).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = authed(Method::POST, uri, token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = authed(Method::PUT, uri, token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = authed(Method::DELETE, uri, token)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

const BOUNDARY: &str = "pmtrack-test-boundary";

/// POST a multipart form with one file part named `field`.
pub async fn post_file_auth(
    app: &Router,
    uri: &str,
    token: &str,
    field: &str,
    filename: &str,
    bytes: &[u8],
) -> Response<Body> {
    post_multipart_auth(app, uri, token, &[(field, filename, bytes)]).await
}

/// POST a multipart form with one file part per `(field, filename, bytes)`.
pub async fn post_multipart_auth(
    app: &Router,
    uri: &str,
    token: &str,
    parts: &[(&str, &str, &[u8])],
) -> Response<Body> {
    let mut body = Vec::new();
    for (field, filename, bytes) in parts {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
                 filename=\"{filename}\"\r\nContent-Type: text/plain\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = authed(Method::POST, uri, token)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Create a project through the API as `token`'s user and return its JSON.
pub async fn create_project(app: &Router, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(app, "/api/v1/projects", token, body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
