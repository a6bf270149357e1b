//! Account service exposing signup and login over HTTP.
//!
//! Users are stored in SQLite, passwords are hashed with bcrypt and sessions
//! are stateless JWT (refresh, access) pairs. The schema is applied out of
//! band by the `authgate-migrate` binary before the server starts.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod utils;

use crate::auth::password::PasswordHasher;
use crate::auth::service::AuthService;
use crate::config::Config;
use crate::errors::ServiceResult;
use crate::repositories::user_repository::UserRepository;
use crate::utils::jwt::JwtUtils;
use axum::{Extension, Router, response::Json, routing::get};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Wires the SQLite store, password hasher and token utilities into an `AuthService`.
pub fn build_auth_service(config: &Config, pool: SqlitePool) -> ServiceResult<AuthService> {
    let jwt_utils = JwtUtils::from_config(config)?;

    AuthService::new(
        Arc::new(UserRepository::new(pool)),
        PasswordHasher::new(config.bcrypt_cost),
        Arc::new(jwt_utils),
    )
}

/// Builds the application router.
pub fn build_app(auth_service: AuthService) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .nest("/auth", auth::routes::auth_router(&auth_service))
        .layer(Extension(auth_service))
}

async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": "authgate",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
