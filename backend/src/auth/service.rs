//! Core business logic for the authentication system.

use crate::auth::models::*;
use crate::auth::password::PasswordHasher;
use crate::database::models::CreateUser;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::CredentialStore;
use crate::utils::jwt::{Claims, JwtUtils, TokenKind};
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::{Validate, ValidationErrors};

pub const MISSING_SIGNUP_FIELDS: &str = "Please provide all required fields.";
pub const MISSING_LOGIN_FIELDS: &str = "Please provide both username and password.";
pub const MISSING_REFRESH_TOKEN: &str = "Please provide a refresh token.";

/// Authentication service for handling signup, login and token refresh
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    jwt_utils: Arc<JwtUtils>,
    /// Verified against when the username is unknown so both login failures cost the same.
    dummy_hash: Arc<str>,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: PasswordHasher,
        jwt_utils: Arc<JwtUtils>,
    ) -> ServiceResult<Self> {
        let dummy_hash = hasher.hash("authgate-dummy-password")?;

        Ok(AuthService {
            store,
            hasher,
            jwt_utils,
            dummy_hash: dummy_hash.into(),
        })
    }

    pub fn jwt_utils(&self) -> &Arc<JwtUtils> {
        &self.jwt_utils
    }

    /// Register a new user and issue their first token pair
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<TokenPair> {
        if let Err(validation_errors) = request.validate() {
            debug!("Signup rejected: {}", describe(&validation_errors));
            return Err(ServiceError::validation(MISSING_SIGNUP_FIELDS));
        }
        let SignupRequest {
            username: Some(username),
            password: Some(password),
            email: Some(email),
        } = request
        else {
            return Err(ServiceError::validation(MISSING_SIGNUP_FIELDS));
        };

        if self.store.user_exists(&username).await? {
            info!(username = %username, "Signup rejected: username taken");
            return Err(ServiceError::already_exists("Username", username));
        }

        let password_hash = self.hasher.hash_blocking(password).await?;

        // The store's unique constraint still wins if a concurrent signup got here first.
        let user = self
            .store
            .create_user(CreateUser {
                username,
                email,
                password_hash,
            })
            .await?;

        let tokens = self.jwt_utils.issue(&user)?;
        info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(tokens)
    }

    /// Authenticate a user by username and password and issue a token pair
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<TokenPair> {
        if let Err(validation_errors) = request.validate() {
            debug!("Login rejected: {}", describe(&validation_errors));
            return Err(ServiceError::validation(MISSING_LOGIN_FIELDS));
        }
        let LoginRequest {
            username: Some(username),
            password: Some(password),
        } = request
        else {
            return Err(ServiceError::validation(MISSING_LOGIN_FIELDS));
        };

        let Some(user) = self.store.find_user_by_username(&username).await? else {
            self.hasher
                .verify_blocking(password, self.dummy_hash.to_string())
                .await;
            warn!(username = %username, "Login failed");
            return Err(ServiceError::InvalidCredentials);
        };

        if !self
            .hasher
            .verify_blocking(password, user.password_hash.clone())
            .await
        {
            warn!(username = %username, "Login failed");
            return Err(ServiceError::InvalidCredentials);
        }

        let tokens = self.jwt_utils.issue(&user)?;
        info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(tokens)
    }

    /// Exchange a valid refresh token for a new access token
    pub async fn refresh_token(
        &self,
        request: RefreshTokenRequest,
    ) -> ServiceResult<RefreshTokenResponse> {
        if request.validate().is_err() {
            return Err(ServiceError::validation(MISSING_REFRESH_TOKEN));
        }
        let Some(refresh) = request.refresh else {
            return Err(ServiceError::validation(MISSING_REFRESH_TOKEN));
        };

        let claims = self
            .jwt_utils
            .verify(&refresh, TokenKind::Refresh)
            .inspect_err(|e| warn!("Refresh rejected: {}", e))?;

        let user = self
            .store
            .find_user_by_id(claims.user_id())
            .await?
            .ok_or_else(|| ServiceError::token_invalid("Token subject no longer exists"))?;

        let access = self
            .jwt_utils
            .generate_access_token(&user.id, &user.username)?;

        Ok(RefreshTokenResponse { access })
    }

    /// Load the profile behind a verified access token
    pub async fn current_user(&self, claims: &Claims) -> ServiceResult<UserInfo> {
        let user = self
            .store
            .find_user_by_id(claims.user_id())
            .await?
            .ok_or_else(|| ServiceError::token_invalid("Token subject no longer exists"))?;

        Ok(UserInfo {
            id: user.id,
            username: user.username,
            email: user.email,
        })
    }
}

/// Flattens field errors into `field: message` pairs for logging.
fn describe(validation_errors: &ValidationErrors) -> String {
    let error_messages: Vec<String> = validation_errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                format!(
                    "{}: {}",
                    field,
                    error.message.as_ref().unwrap_or(&"Invalid value".into())
                )
            })
        })
        .collect();
    error_messages.join(", ")
}
