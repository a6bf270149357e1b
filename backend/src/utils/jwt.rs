//! JWT token utilities for authentication.
//!
//! Issues signed (refresh, access) token pairs bound to a user and validates
//! presented tokens for signature, expiry and token kind. Tokens are stateless:
//! nothing is recorded server-side.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::database::models::User;
use crate::errors::{ServiceError, ServiceResult};

/// Which half of a token pair a token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT Claims structure shared by access and refresh tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Username at issue time
    pub username: String,
    /// Access or refresh
    pub token_type: TokenKind,
    /// Unique token id
    pub jti: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// A freshly minted refresh/access pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub refresh: String,
    pub access: String,
}

/// JWT token utility for creating and validating tokens
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtUtils {
    /// Create a new JwtUtils instance.
    ///
    /// # Errors
    /// Returns `ServiceError::InternalError` if the secret is empty, the
    /// access lifetime is not strictly shorter than the refresh lifetime, or a
    /// refresh token issued now would expire past the representable time range.
    pub fn new(
        secret: &str,
        access_ttl_seconds: u64,
        refresh_ttl_seconds: u64,
    ) -> ServiceResult<Self> {
        if secret.is_empty() {
            return Err(ServiceError::internal_error("JWT secret must not be empty"));
        }
        if access_ttl_seconds == 0 || access_ttl_seconds >= refresh_ttl_seconds {
            return Err(ServiceError::internal_error(
                "Access token lifetime must be non-zero and shorter than the refresh token lifetime",
            ));
        }

        let access_ttl = seconds(access_ttl_seconds)?;
        let refresh_ttl = seconds(refresh_ttl_seconds)?;
        expiry_from(Utc::now(), refresh_ttl)?;

        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            access_ttl,
            refresh_ttl,
        })
    }

    /// Create a JwtUtils instance from the loaded configuration.
    pub fn from_config(config: &Config) -> ServiceResult<Self> {
        Self::new(
            &config.jwt_secret,
            config.access_token_ttl_seconds,
            config.refresh_token_ttl_seconds,
        )
    }

    /// Issue a refresh and an access token for the user.
    pub fn issue(&self, user: &User) -> ServiceResult<TokenPair> {
        let refresh = self.encode_claims(&user.id, &user.username, TokenKind::Refresh)?;
        let access = self.encode_claims(&user.id, &user.username, TokenKind::Access)?;

        Ok(TokenPair { refresh, access })
    }

    /// Generate a standalone access token, as done when redeeming a refresh token.
    pub fn generate_access_token(&self, user_id: &str, username: &str) -> ServiceResult<String> {
        self.encode_claims(user_id, username, TokenKind::Access)
    }

    /// Validate a token's signature and expiry and check it is of the expected kind.
    ///
    /// # Errors
    /// `ServiceError::TokenExpired` once the current time reaches `exp`,
    /// otherwise `ServiceError::TokenInvalid` for any signature, format or kind
    /// mismatch.
    pub fn verify(&self, token: &str, expected: TokenKind) -> ServiceResult<Claims> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                _ => ServiceError::token_invalid(format!("Token validation failed: {}", e)),
            })?;

        // jsonwebtoken still accepts a token during its final second.
        if claims.exp <= Utc::now().timestamp() as usize {
            return Err(ServiceError::TokenExpired);
        }

        if claims.token_type != expected {
            return Err(ServiceError::token_invalid(format!(
                "Expected {:?} token, got {:?}",
                expected, claims.token_type
            )));
        }

        Ok(claims)
    }

    fn encode_claims(&self, user_id: &str, username: &str, kind: TokenKind) -> ServiceResult<String> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };

        let now = Utc::now();
        let exp = expiry_from(now, ttl)?;

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            token_type: kind,
            jti: Uuid::now_v7().simple().to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }
}

fn seconds(value: u64) -> ServiceResult<Duration> {
    i64::try_from(value)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(|| ServiceError::internal_error(format!("Token lifetime out of range: {}", value)))
}

fn expiry_from(now: DateTime<Utc>, ttl: Duration) -> ServiceResult<DateTime<Utc>> {
    now.checked_add_signed(ttl).ok_or_else(|| {
        ServiceError::internal_error(format!(
            "Token lifetime of {} seconds overflows the expiry timestamp",
            ttl.num_seconds()
        ))
    })
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn test_user() -> User {
        User {
            id: "0190a000-0000-7000-8000-000000000001".to_string(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    fn jwt() -> JwtUtils {
        JwtUtils::new(SECRET, 300, 86400).unwrap()
    }

    fn sign_raw(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_verify_pair() {
        let jwt = jwt();
        let pair = jwt.issue(&test_user()).unwrap();

        let access = jwt.verify(&pair.access, TokenKind::Access).unwrap();
        assert_eq!(access.user_id(), "0190a000-0000-7000-8000-000000000001");
        assert_eq!(access.username, "alice");

        let refresh = jwt.verify(&pair.refresh, TokenKind::Refresh).unwrap();
        assert_eq!(refresh.sub, access.sub);
        assert!(access.exp < refresh.exp);
        assert_ne!(access.jti, refresh.jti);
    }

    #[test]
    fn test_pairs_are_distinct() {
        let jwt = jwt();
        let user = test_user();
        let first = jwt.issue(&user).unwrap();
        let second = jwt.issue(&user).unwrap();

        assert_ne!(first.access, second.access);
        assert_ne!(first.refresh, second.refresh);
    }

    #[test]
    fn test_wrong_kind_is_invalid() {
        let jwt = jwt();
        let pair = jwt.issue(&test_user()).unwrap();

        assert!(matches!(
            jwt.verify(&pair.access, TokenKind::Refresh),
            Err(ServiceError::TokenInvalid { .. })
        ));
        assert!(matches!(
            jwt.verify(&pair.refresh, TokenKind::Access),
            Err(ServiceError::TokenInvalid { .. })
        ));
    }

    #[test]
    fn test_foreign_signature_is_invalid() {
        let other = JwtUtils::new("another-secret", 300, 86400).unwrap();
        let pair = other.issue(&test_user()).unwrap();

        assert!(matches!(
            jwt().verify(&pair.access, TokenKind::Access),
            Err(ServiceError::TokenInvalid { .. })
        ));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(matches!(
            jwt().verify("not.a.token", TokenKind::Access),
            Err(ServiceError::TokenInvalid { .. })
        ));
        assert!(matches!(
            jwt().verify("", TokenKind::Access),
            Err(ServiceError::TokenInvalid { .. })
        ));
    }

    fn claims_expiring_at(exp: usize) -> Claims {
        Claims {
            sub: "user-1".to_string(),
            username: "alice".to_string(),
            token_type: TokenKind::Access,
            jti: "jti-1".to_string(),
            exp,
            iat: exp - 300,
        }
    }

    #[test]
    fn test_expired_token() {
        let now = Utc::now().timestamp() as usize;
        let token = sign_raw(&claims_expiring_at(now - 10), SECRET);

        assert!(matches!(
            jwt().verify(&token, TokenKind::Access),
            Err(ServiceError::TokenExpired)
        ));
    }

    #[test]
    fn test_token_is_expired_at_its_exp_second() {
        let now = Utc::now().timestamp() as usize;
        let token = sign_raw(&claims_expiring_at(now), SECRET);

        assert!(matches!(
            jwt().verify(&token, TokenKind::Access),
            Err(ServiceError::TokenExpired)
        ));

        let later = sign_raw(&claims_expiring_at(now + 60), SECRET);
        assert!(jwt().verify(&later, TokenKind::Access).is_ok());
    }

    #[test]
    fn test_generate_access_token() {
        let jwt = jwt();
        let token = jwt.generate_access_token("user-1", "alice").unwrap();
        let claims = jwt.verify(&token, TokenKind::Access).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert!(claims.exp > claims.iat);
        assert!(claims.exp - claims.iat <= 300);
    }

    #[test]
    fn test_rejects_bad_lifetimes() {
        assert!(JwtUtils::new(SECRET, 3600, 3600).is_err());
        assert!(JwtUtils::new(SECRET, 0, 3600).is_err());
        assert!(JwtUtils::new("", 300, 3600).is_err());
    }

    #[test]
    fn test_rejects_lifetime_past_representable_expiry() {
        let err = JwtUtils::new(SECRET, 300, 1_000_000_000_000_000)
            .err()
            .unwrap();
        assert!(matches!(err, ServiceError::InternalError { .. }));
        assert!(JwtUtils::new(SECRET, 300, u64::MAX).is_err());

        let far = expiry_from(DateTime::<Utc>::MAX_UTC, Duration::try_seconds(1).unwrap());
        assert!(far.is_err());
    }
}
