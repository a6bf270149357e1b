//! Middleware for protecting authenticated routes.
//!
//! Validates the bearer access token and exposes its claims to handlers
//! through request extensions.

use crate::api::common::{ApiError, MISSING_CREDENTIALS, error_response, service_error_to_http};
use crate::utils::jwt::{JwtUtils, TokenKind};
use axum::{
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// JWT authentication middleware
pub async fn jwt_auth(
    State(jwt_utils): State<Arc<JwtUtils>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, MISSING_CREDENTIALS))?;

    // Refresh tokens are not accepted here.
    let claims = jwt_utils
        .verify(token, TokenKind::Access)
        .map_err(service_error_to_http)?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
