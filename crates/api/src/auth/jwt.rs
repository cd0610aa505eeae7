// JWT token service for authentication
// Decision: Use HS256 algorithm (symmetric key, at least 32 bytes)
// Decision: Access tokens only; no refresh tokens and no server-side token store
// Decision: Expiry is checked here with second granularity: valid iff now < exp

use chrono::{DateTime, Utc};
use corkboard_core::{Error, Result, UserId};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::config::JwtConfig;

/// Minimum signing key length in bytes (256 bits)
pub const MIN_SECRET_BYTES: usize = 32;

/// Longest accepted access token lifetime (10 years)
pub const MAX_ACCESS_TOKEN_LIFETIME_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// JWT claims for access tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessTokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// A freshly signed access token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Token service for issuing and verifying access tokens
#[derive(Clone)]
pub struct TokenService {
    access_token_lifetime_secs: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Derive signing keys from the configuration.
    ///
    /// Fails with `Error::Configuration` when the secret is shorter than
    /// [`MIN_SECRET_BYTES`] or the lifetime is zero or longer than
    /// [`MAX_ACCESS_TOKEN_LIFETIME_SECS`].
    pub fn new(config: &JwtConfig) -> Result<Self> {
        let key_bytes = config.secret.as_bytes();
        if key_bytes.len() < MIN_SECRET_BYTES {
            return Err(Error::config(format!(
                "JWT secret must be at least {} bytes",
                MIN_SECRET_BYTES
            )));
        }

        let access_token_lifetime_secs = i64::try_from(config.access_token_lifetime.as_secs())
            .ok()
            .filter(|secs| (1..=MAX_ACCESS_TOKEN_LIFETIME_SECS).contains(secs))
            .ok_or_else(|| {
                Error::config(format!(
                    "Access token lifetime must be between 1 and {} seconds",
                    MAX_ACCESS_TOKEN_LIFETIME_SECS
                ))
            })?;

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is enforced by verify_at so that exp == now counts as expired
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "iat", "exp"]);

        Ok(Self {
            access_token_lifetime_secs,
            encoding_key: EncodingKey::from_secret(key_bytes),
            decoding_key: DecodingKey::from_secret(key_bytes),
            validation,
        })
    }

    /// Issue an access token for a user
    pub fn issue(&self, user_id: UserId) -> Result<IssuedToken> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue an access token as if the current time were `now`
    pub fn issue_at(&self, user_id: UserId, now: DateTime<Utc>) -> Result<IssuedToken> {
        let issued_at = now.timestamp();
        let expires_at = issued_at
            .checked_add(self.access_token_lifetime_secs)
            .ok_or_else(|| anyhow::anyhow!("Access token expiry overflows"))?;

        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            iat: issued_at,
            exp: expires_at,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to encode access token: {}", e))?;

        Ok(IssuedToken {
            token,
            issued_at,
            expires_at,
        })
    }

    /// Verify an access token and return its subject
    pub fn verify(&self, token: &str) -> Result<UserId> {
        self.verify_at(token, Utc::now())
    }

    /// Verify an access token as if the current time were `now`
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<UserId> {
        let token_data = decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "JWT validation failed");
                Error::TokenInvalid
            })?;

        let claims = token_data.claims;
        let user_id = claims
            .sub
            .parse::<UserId>()
            .map_err(|_| Error::TokenInvalid)?;

        if now.timestamp() >= claims.exp {
            return Err(Error::TokenExpired);
        }

        Ok(user_id)
    }

    /// Get access token lifetime in seconds
    pub fn access_token_expiration_seconds(&self) -> i64 {
        self.access_token_lifetime_secs
    }
}
