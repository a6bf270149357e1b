//! Handler functions for authentication-related API endpoints.
//!
//! These functions extract the typed request body (JSON or form fields), hand it to
//! `auth::service` for the business logic and translate the outcome into
//! status codes. A body that cannot be parsed is reported with the same
//! message as a body with missing fields.

use crate::api::common::{ApiError, error_response, service_error_to_http};
use crate::api::extract::{Payload, PayloadRejection};
use crate::auth::models::*;
use crate::auth::service::{
    AuthService, MISSING_LOGIN_FIELDS, MISSING_REFRESH_TOKEN, MISSING_SIGNUP_FIELDS,
};
use crate::utils::jwt::Claims;
use axum::{
    extract::Extension,
    http::StatusCode,
    response::Json as ResponseJson,
};

fn rejected_body(rejection: PayloadRejection, message: &str) -> ApiError {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    error_response(StatusCode::BAD_REQUEST, message)
}

/// Handle account creation request
#[axum::debug_handler]
pub async fn signup(
    Extension(auth_service): Extension<AuthService>,
    payload: Result<Payload<SignupRequest>, PayloadRejection>,
) -> Result<(StatusCode, ResponseJson<TokenPair>), ApiError> {
    let Payload(payload) = payload.map_err(|e| rejected_body(e, MISSING_SIGNUP_FIELDS))?;

    match auth_service.signup(payload).await {
        Ok(tokens) => Ok((StatusCode::CREATED, ResponseJson(tokens))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(auth_service): Extension<AuthService>,
    payload: Result<Payload<LoginRequest>, PayloadRejection>,
) -> Result<ResponseJson<TokenPair>, ApiError> {
    let Payload(payload) = payload.map_err(|e| rejected_body(e, MISSING_LOGIN_FIELDS))?;

    match auth_service.login(payload).await {
        Ok(tokens) => Ok(ResponseJson(tokens)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle token refresh request
#[axum::debug_handler]
pub async fn refresh_token(
    Extension(auth_service): Extension<AuthService>,
    payload: Result<Payload<RefreshTokenRequest>, PayloadRejection>,
) -> Result<ResponseJson<RefreshTokenResponse>, ApiError> {
    let Payload(payload) = payload.map_err(|e| rejected_body(e, MISSING_REFRESH_TOKEN))?;

    match auth_service.refresh_token(payload).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Get current user information from token
#[axum::debug_handler]
pub async fn me(
    Extension(auth_service): Extension<AuthService>,
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<UserInfo>, ApiError> {
    auth_service
        .current_user(&claims)
        .await
        .map(ResponseJson)
        .map_err(service_error_to_http)
}
