// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage, and
// implements the core store traits on top of it.

use std::sync::Arc;

use async_trait::async_trait;
use corkboard_core::{
    Board, BoardStore, BoardUpdate, Credential, CredentialStore, CredentialUpdate, NewBoard,
    NewCredential, NewStickyNote, Result, StickyNote, StickyNoteFilter, StickyNoteStore,
    StickyNoteUpdate, UserId,
};
use uuid::Uuid;

use super::memory::InMemoryDatabase;
use super::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend from a database URL and apply migrations
    pub async fn postgres(database_url: &str) -> Result<Self> {
        let db = Database::from_url(database_url).await?;
        db.migrate().await?;
        Ok(Self::Postgres(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryDatabase::new()))
    }

    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }
}

// ============================================
// Users
// ============================================

#[async_trait]
impl CredentialStore for StorageBackend {
    async fn find_by_username(&self, username: &str) -> Result<Option<Credential>> {
        match self {
            Self::Postgres(db) => db.get_user_by_username(username).await,
            Self::InMemory(db) => db.get_user_by_username(username).await,
        }
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<Credential>> {
        match self {
            Self::Postgres(db) => db.get_user(id).await,
            Self::InMemory(db) => db.get_user(id).await,
        }
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let found = match self {
            Self::Postgres(db) => db.get_user_by_email(email).await?,
            Self::InMemory(db) => db.get_user_by_email(email).await?,
        };
        Ok(found.is_some())
    }

    async fn save(&self, input: NewCredential) -> Result<Credential> {
        match self {
            Self::Postgres(db) => db.create_user(input).await,
            Self::InMemory(db) => db.create_user(input).await,
        }
    }

    async fn update(&self, id: UserId, input: CredentialUpdate) -> Result<Option<Credential>> {
        match self {
            Self::Postgres(db) => db.update_user(id, input).await,
            Self::InMemory(db) => db.update_user(id, input).await,
        }
    }

    async fn delete(&self, id: UserId) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_user(id).await,
            Self::InMemory(db) => db.delete_user(id).await,
        }
    }

    async fn list(&self) -> Result<Vec<Credential>> {
        match self {
            Self::Postgres(db) => db.list_users().await,
            Self::InMemory(db) => db.list_users().await,
        }
    }
}

// ============================================
// Boards
// ============================================

#[async_trait]
impl BoardStore for StorageBackend {
    async fn list(&self) -> Result<Vec<Board>> {
        match self {
            Self::Postgres(db) => db.list_boards().await,
            Self::InMemory(db) => db.list_boards().await,
        }
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Board>> {
        match self {
            Self::Postgres(db) => db.list_boards_by_owner(owner_id).await,
            Self::InMemory(db) => db.list_boards_by_owner(owner_id).await,
        }
    }

    async fn get(&self, id: Uuid) -> Result<Option<Board>> {
        match self {
            Self::Postgres(db) => db.get_board(id).await,
            Self::InMemory(db) => db.get_board(id).await,
        }
    }

    async fn save(&self, input: NewBoard) -> Result<Board> {
        match self {
            Self::Postgres(db) => db.create_board(input).await,
            Self::InMemory(db) => db.create_board(input).await,
        }
    }

    async fn update(&self, id: Uuid, input: BoardUpdate) -> Result<Option<Board>> {
        match self {
            Self::Postgres(db) => db.update_board(id, input).await,
            Self::InMemory(db) => db.update_board(id, input).await,
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_board(id).await,
            Self::InMemory(db) => db.delete_board(id).await,
        }
    }
}

// ============================================
// Sticky notes
// ============================================

#[async_trait]
impl StickyNoteStore for StorageBackend {
    async fn list(&self, filter: StickyNoteFilter) -> Result<Vec<StickyNote>> {
        match self {
            Self::Postgres(db) => db.list_notes(&filter).await,
            Self::InMemory(db) => db.list_notes(&filter).await,
        }
    }

    async fn get(&self, id: Uuid) -> Result<Option<StickyNote>> {
        match self {
            Self::Postgres(db) => db.get_note(id).await,
            Self::InMemory(db) => db.get_note(id).await,
        }
    }

    async fn save(&self, input: NewStickyNote) -> Result<StickyNote> {
        match self {
            Self::Postgres(db) => db.create_note(input).await,
            Self::InMemory(db) => db.create_note(input).await,
        }
    }

    async fn update(&self, id: Uuid, input: StickyNoteUpdate) -> Result<Option<StickyNote>> {
        match self {
            Self::Postgres(db) => db.update_note(id, input).await,
            Self::InMemory(db) => db.update_note(id, input).await,
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_note(id).await,
            Self::InMemory(db) => db.delete_note(id).await,
        }
    }
}
