// Core traits for pluggable backends
//
// These traits let the auth core and the services run against different
// backends:
// - In-memory implementations for dev mode and testing
// - Database implementations for production

use async_trait::async_trait;
use uuid::Uuid;

use crate::board::{Board, BoardUpdate, NewBoard};
use crate::error::Result;
use crate::principal::UserId;
use crate::sticky_note::{NewStickyNote, StickyNote, StickyNoteFilter, StickyNoteUpdate};
use crate::user::{Credential, CredentialUpdate, NewCredential};

// ============================================================================
// CredentialStore - user identities and password hashes
// ============================================================================

/// Trait for reading and persisting credentials
///
/// Transient backend failures must be reported as `Error::StoreUnavailable`
/// so that callers never confuse them with authentication failures.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find a credential by exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<Credential>>;

    /// Find a credential by id
    async fn find_by_id(&self, id: UserId) -> Result<Option<Credential>>;

    /// Whether a credential with this username exists
    async fn exists_by_username(&self, username: &str) -> Result<bool> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    /// Whether a credential with this email exists
    async fn exists_by_email(&self, email: &str) -> Result<bool>;

    /// Persist a new credential and return it with its assigned id
    async fn save(&self, input: NewCredential) -> Result<Credential>;

    /// Apply a partial update; `None` if the credential does not exist
    async fn update(&self, id: UserId, input: CredentialUpdate) -> Result<Option<Credential>>;

    /// Delete a credential; `false` if it did not exist
    async fn delete(&self, id: UserId) -> Result<bool>;

    /// List all credentials, oldest first
    async fn list(&self) -> Result<Vec<Credential>>;
}

// ============================================================================
// CredentialVerifier - password hashing capability
// ============================================================================

/// Trait for hashing and checking secrets
///
/// Implementations choose the algorithm; callers only ever compare through
/// `verify_secret`.
pub trait CredentialVerifier: Send + Sync {
    /// Hash a plaintext secret for storage
    fn hash_secret(&self, plain: &str) -> Result<String>;

    /// Compare a plaintext secret against a stored hash
    fn verify_secret(&self, plain: &str, hash: &str) -> Result<bool>;
}

// ============================================================================
// BoardStore - boards
// ============================================================================

#[async_trait]
pub trait BoardStore: Send + Sync {
    /// List all boards, newest first
    async fn list(&self) -> Result<Vec<Board>>;

    /// List boards owned by a user, newest first
    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Board>>;

    async fn get(&self, id: Uuid) -> Result<Option<Board>>;

    async fn save(&self, input: NewBoard) -> Result<Board>;

    async fn update(&self, id: Uuid, input: BoardUpdate) -> Result<Option<Board>>;

    /// Delete a board and its notes; `false` if it did not exist
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

// ============================================================================
// StickyNoteStore - sticky notes
// ============================================================================

#[async_trait]
pub trait StickyNoteStore: Send + Sync {
    /// List notes matching the filter
    async fn list(&self, filter: StickyNoteFilter) -> Result<Vec<StickyNote>>;

    async fn get(&self, id: Uuid) -> Result<Option<StickyNote>>;

    async fn save(&self, input: NewStickyNote) -> Result<StickyNote>;

    async fn update(&self, id: Uuid, input: StickyNoteUpdate) -> Result<Option<StickyNote>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}
