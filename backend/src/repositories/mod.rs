//! Persistence layer for user credentials.
//!
//! `CredentialStore` is the seam the authentication service depends on;
//! `UserRepository` is the SQLite implementation used by the server.

use crate::database::models::{CreateUser, User};
use crate::errors::ServiceResult;
use async_trait::async_trait;

pub mod user_repository;

/// Storage operations required by the authentication flow.
///
/// Implementations must enforce username uniqueness themselves and report a
/// duplicate insert as `ServiceError::AlreadyExists`.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns `true` if a user with exactly this username exists.
    async fn user_exists(&self, username: &str) -> ServiceResult<bool>;

    /// Looks up a user by exact, case-sensitive username.
    async fn find_user_by_username(&self, username: &str) -> ServiceResult<Option<User>>;

    /// Looks up a user by id.
    async fn find_user_by_id(&self, id: &str) -> ServiceResult<Option<User>>;

    /// Inserts a new user.
    async fn create_user(&self, user: CreateUser) -> ServiceResult<User>;
}
