// Storage layer for Corkboard
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// StorageBackend implements the core store traits:
// - CredentialStore: users and password hashes
// - BoardStore: boards
// - StickyNoteStore: notes on boards
// Argon2Verifier implements CredentialVerifier.

pub mod backend;
pub mod memory;
pub mod models;
pub mod password;
pub mod repositories;

pub use backend::StorageBackend;
pub use memory::InMemoryDatabase;
pub use password::Argon2Verifier;
pub use repositories::{Database, STORE_TIMEOUT};
