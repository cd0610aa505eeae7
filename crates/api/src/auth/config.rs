// Authentication configuration loaded from environment variables.
// Decision: AUTH_ prefix for all auth config
// Decision: No built-in fallback secret; a missing or short secret stops startup

use std::time::Duration;

/// Default access token lifetime (1 hour)
pub const DEFAULT_ACCESS_TOKEN_LIFETIME_SECS: u64 = 3600;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing JWTs (at least 32 bytes)
    pub secret: String,
    /// Access token lifetime
    pub access_token_lifetime: Duration,
}

// The secret must never reach logs
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_lifetime", &self.access_token_lifetime)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            access_token_lifetime: Duration::from_secs(DEFAULT_ACCESS_TOKEN_LIFETIME_SECS),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
}

impl AuthConfig {
    /// Load configuration from environment variables
    ///
    /// - `AUTH_JWT_SECRET`: signing secret (required, validated by `TokenService::new`)
    /// - `AUTH_JWT_ACCESS_TOKEN_LIFETIME`: access token lifetime in seconds (default: 3600)
    pub fn from_env() -> Self {
        let secret = std::env::var("AUTH_JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("AUTH_JWT_SECRET not set");
            String::new()
        });

        let access_token_lifetime = std::env::var("AUTH_JWT_ACCESS_TOKEN_LIFETIME")
            .ok()
            .and_then(|s| parse_lifetime(&s))
            .unwrap_or_else(|| Duration::from_secs(DEFAULT_ACCESS_TOKEN_LIFETIME_SECS));

        Self {
            jwt: JwtConfig {
                secret,
                access_token_lifetime,
            },
        }
    }
}

/// Parse a positive lifetime in seconds
fn parse_lifetime(s: &str) -> Option<Duration> {
    match s.trim().parse::<u64>() {
        Ok(0) | Err(_) => {
            tracing::warn!(value = %s, "Ignoring invalid AUTH_JWT_ACCESS_TOKEN_LIFETIME");
            None
        }
        Ok(secs) => Some(Duration::from_secs(secs)),
    }
}
