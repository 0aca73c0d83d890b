//! Bearer token codec.
//!
//! Tokens are HS256-signed JWTs carrying the user id in `sub`. Verification
//! checks signature and expiry; every failure collapses to [`InvalidToken`].

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use nexustrack_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's id.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for token issuing and verification.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in hours (default: 168, one week).
    pub expiry_hours: i64,
}

/// Default token lifetime in hours.
const DEFAULT_EXPIRY_HOURS: i64 = 24 * 7;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var            | Required | Default |
    /// |--------------------|----------|---------|
    /// | `JWT_SECRET`       | **yes**  | --      |
    /// | `JWT_EXPIRY_HOURS` | no       | `168`   |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let expiry_hours: i64 = std::env::var("JWT_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_HOURS.to_string())
            .parse()
            .expect("JWT_EXPIRY_HOURS must be a valid i64");

        Self {
            secret,
            expiry_hours,
        }
    }

    /// Token lifetime in seconds.
    pub fn expires_in_secs(&self) -> i64 {
        self.expiry_hours * 3600
    }
}

/// The token is malformed, expired, or signed with another secret.
#[derive(Debug, thiserror::Error)]
#[error("invalid token")]
pub struct InvalidToken;

/// Issue an HS256 token for the given user.
pub fn issue_token(user_id: DbId, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        exp: now + config.expires_in_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a token and return its [`Claims`].
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, InvalidToken> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "Token verification failed");
        InvalidToken
    })?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_hours: 1,
        }
    }

    #[test]
    fn test_issue_and_verify_token() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, &config).expect("token generation should succeed");

        let claims = verify_token(&token, &config).expect("token verification should succeed");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Use a margin well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(verify_token(&token, &config).is_err(), "expired token must fail");
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = JwtConfig {
            secret: "secret-alpha".to_string(),
            expiry_hours: 1,
        };
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            expiry_hours: 1,
        };

        let token = issue_token(Uuid::new_v4(), &config_a).expect("token generation should succeed");

        assert!(
            verify_token(&token, &config_b).is_err(),
            "token signed with a different secret must fail"
        );
    }

    #[test]
    fn test_garbage_token_fails() {
        assert!(verify_token("not.a.jwt", &test_config()).is_err());
        assert!(verify_token("", &test_config()).is_err());
    }
}
