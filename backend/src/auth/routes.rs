//! Defines the HTTP routes for authentication.
//!
//! Signup, login and refresh are public; `/me` requires a bearer access
//! token. The router expects an `Extension<AuthService>` layer above it.

use crate::auth::handlers::*;
use crate::auth::middleware::jwt_auth;
use crate::auth::service::AuthService;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router(auth_service: &AuthService) -> Router {
    let jwt_utils = auth_service.jwt_utils().clone();

    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
        .route(
            "/me",
            get(me).layer(middleware::from_fn_with_state(jwt_utils, jwt_auth)),
        )
}
