// User and credential domain types
//
// Credential is the stored identity including the password hash; it never
// leaves the server. User is the public view returned by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::principal::UserId;

/// Stored credential: identity plus password hash.
#[derive(Clone)]
pub struct Credential {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Input for persisting a new credential. The hash is computed by the caller.
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Partial credential update. Only provided fields are changed.
#[derive(Debug, Clone, Default)]
pub struct CredentialUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct User {
    /// Unique identifier of the user.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Timestamp when the user registered.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last profile change.
    pub updated_at: DateTime<Utc>,
}

impl From<&Credential> for User {
    fn from(c: &Credential) -> Self {
        Self {
            id: c.id,
            username: c.username.clone(),
            email: c.email.clone(),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl From<Credential> for User {
    fn from(c: Credential) -> Self {
        Self {
            id: c.id,
            username: c.username,
            email: c.email,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
