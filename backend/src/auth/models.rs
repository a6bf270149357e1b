//! Data structures for authentication requests and responses.
//!
//! Request fields are optional at the deserialization level so that an absent
//! or `null` field reaches validation and is reported with the endpoint's own
//! message rather than as a body parsing failure.

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use crate::utils::jwt::TokenPair;

/// Signup request payload
#[derive(Deserialize, Validate, Default)]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(
        required(message = "Username is required"),
        length(min = 1, message = "Username is required")
    )]
    pub username: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Password is required"),
        length(min = 1, message = "Password is required")
    )]
    pub password: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Email is required"),
        length(min = 1, message = "Email is required")
    )]
    pub email: Option<String>,
}

/// Login request payload
#[derive(Deserialize, Validate, Default)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(
        required(message = "Username is required"),
        length(min = 1, message = "Username is required")
    )]
    pub username: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "Password is required"),
        length(min = 1, message = "Password is required")
    )]
    pub password: Option<String>,
}

/// Token refresh request
#[derive(Deserialize, Validate, Default)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    #[validate(
        required(message = "Refresh token is required"),
        length(min = 1, message = "Refresh token is required")
    )]
    pub refresh: Option<String>,
}

/// Token refresh response
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    pub access: String,
}

/// Public profile of the authenticated user
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_validation() {
        let full: SignupRequest = serde_json::from_str(
            r#"{"username":"alice","password":"S3cret!","email":"a@x.com"}"#,
        )
        .unwrap();
        assert!(full.validate().is_ok());

        let missing: SignupRequest =
            serde_json::from_str(r#"{"username":"alice","password":"S3cret!"}"#).unwrap();
        assert!(missing.validate().is_err());

        let null: SignupRequest = serde_json::from_str(
            r#"{"username":null,"password":"S3cret!","email":"a@x.com"}"#,
        )
        .unwrap();
        assert!(null.validate().is_err());

        let empty: SignupRequest = serde_json::from_str(
            r#"{"username":"alice","password":"","email":"a@x.com"}"#,
        )
        .unwrap();
        let errors = empty.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_login_validation() {
        let empty: LoginRequest = serde_json::from_str("{}").unwrap();
        let errors = empty.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
        assert!(errors.field_errors().contains_key("password"));

        let extra: LoginRequest = serde_json::from_str(
            r#"{"username":"alice","password":"S3cret!","email":"ignored"}"#,
        )
        .unwrap();
        assert!(extra.validate().is_ok());
    }

    #[test]
    fn test_email_format_is_not_checked() {
        let request = SignupRequest {
            username: Some("alice".to_string()),
            password: Some("S3cret!".to_string()),
            email: Some("not an email".to_string()),
        };
        assert!(request.validate().is_ok());
    }
}
