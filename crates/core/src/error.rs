// Error types shared by the auth core, services and stores

use thiserror::Error;

/// Result type alias for Corkboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while authenticating, authorizing or serving a request
#[derive(Debug, Error)]
pub enum Error {
    /// Token signature, structure or subject is not acceptable
    #[error("Invalid token")]
    TokenInvalid,

    /// Token is well-formed and signed but its expiry has passed
    #[error("Token expired")]
    TokenExpired,

    /// No principal is bound to the current request
    #[error("Authentication required")]
    Unauthenticated,

    /// Authenticated, but not the owner of the resource
    #[error("Access denied")]
    Forbidden,

    /// Login failed. Unknown username and wrong password share this variant.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Registration with a username that already exists
    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    /// Registration with an email that already exists
    #[error("Email already exists: {0}")]
    EmailTaken(String),

    /// Invalid startup configuration (e.g. signing key too short)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transient store failure; the caller may retry
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Resource not found
    #[error("{resource} not found with id: {id}")]
    NotFound { resource: &'static str, id: String },

    /// Input rejected by validation
    #[error("{0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a store unavailable error
    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        Error::StoreUnavailable(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Error::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Whether the caller may retry the operation
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::StoreUnavailable(_))
    }

    /// Whether this is an authentication failure (no trusted identity)
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Error::TokenInvalid
                | Error::TokenExpired
                | Error::Unauthenticated
                | Error::InvalidCredentials
        )
    }
}
