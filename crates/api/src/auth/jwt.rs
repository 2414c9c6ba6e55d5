//! Access-token signing and refresh-token digests.
//!
//! An access token is a short-lived HS256 JWT whose [`Claims`] carry the
//! user's database id. A refresh token is an opaque random string: the
//! client holds the plaintext, the `user_sessions` table holds only its
//! SHA-256 hex digest, and lookups re-hash the presented value.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tareas_core::types::DbId;
use uuid::Uuid;

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

/// Payload of every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The authenticated user's database id.
    pub sub: DbId,
    /// Expiry as a UTC Unix timestamp.
    pub exp: i64,
    /// Issue time as a UTC Unix timestamp.
    pub iat: i64,
    /// Random per-token id, useful when correlating logs.
    pub jti: String,
}

impl Claims {
    /// Build claims for `user_id` expiring `ttl_mins` minutes from now.
    fn new(user_id: DbId, ttl_mins: i64) -> Self {
        let iat = chrono::Utc::now().timestamp();
        Self {
            sub: user_id,
            exp: iat + ttl_mins * 60,
            iat,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 key shared by signing and verification.
    pub secret: String,
    /// Access token lifetime in minutes.
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days.
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Read the JWT settings from the environment.
    ///
    /// `JWT_SECRET` is required and must be non-empty; there is no safe
    /// default for a signing key. `JWT_ACCESS_EXPIRY_MINS` (15) and
    /// `JWT_REFRESH_EXPIRY_DAYS` (7) are optional.
    ///
    /// # Panics
    ///
    /// Panics when `JWT_SECRET` is missing or empty, or when a lifetime
    /// variable is not an integer.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET is not set");
        assert!(!secret.is_empty(), "JWT_SECRET is empty");

        Self {
            secret,
            access_token_expiry_mins: env_i64("JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS),
            refresh_token_expiry_days: env_i64(
                "JWT_REFRESH_EXPIRY_DAYS",
                DEFAULT_REFRESH_EXPIRY_DAYS,
            ),
        }
    }
}

fn env_i64(name: &str, default: i64) -> i64 {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be an integer, got '{raw}'")),
        Err(_) => default,
    }
}

/// Sign a fresh access token for `user_id`.
pub fn generate_access_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::new(user_id, config.access_token_expiry_mins);
    // Header::default() selects HS256.
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a token's signature and expiry, returning its [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// Draw a new refresh token as `(plaintext, sha256_hex)`.
///
/// The plaintext goes to the client and is never stored; persist the digest.
pub fn generate_refresh_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let digest = hash_refresh_token(&plaintext);
    (plaintext, digest)
}

/// SHA-256 hex digest of a refresh token, as stored in `user_sessions`.
pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        }
    }

    #[test]
    fn access_token_round_trips() {
        let config = config_with_secret("unit-test-signing-key");
        let token = generate_access_token(77, &config).unwrap();

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, 77);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn each_token_gets_its_own_jti() {
        let config = config_with_secret("unit-test-signing-key");
        let a = validate_token(&generate_access_token(1, &config).unwrap(), &config).unwrap();
        let b = validate_token(&generate_access_token(1, &config).unwrap(), &config).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = config_with_secret("unit-test-signing-key");

        // Hand-roll a token that expired well past the 60s default leeway.
        let iat = chrono::Utc::now().timestamp() - 600;
        let claims = Claims {
            sub: 1,
            exp: iat + 300,
            iat,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let signer = config_with_secret("key-one");
        let verifier = config_with_secret("key-two");

        let token = generate_access_token(5, &signer).unwrap();
        assert!(validate_token(&token, &verifier).is_err());
    }

    #[test]
    fn refresh_digest_is_stable_hex() {
        let (plaintext, digest) = generate_refresh_token();

        assert_eq!(digest, hash_refresh_token(&plaintext));
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(plaintext, digest);
    }
}
