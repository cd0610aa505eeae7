// Corkboard Core
//
// DB-agnostic building blocks shared by the API server and its stores.
//
// Key design decisions:
// - Store access goes through traits (CredentialStore, BoardStore, StickyNoteStore)
// - Password hashing is a capability (CredentialVerifier), not a fixed algorithm
// - Principal is a plain value; there is no process-wide "current user"
// - One error enum covers auth, authorization and store failures

// Tracing setup
pub mod telemetry;

// Domain entity types
pub mod board;
pub mod principal;
pub mod sticky_note;
pub mod user;

pub mod error;
pub mod traits;

// Re-exports for convenience
pub use board::{Board, BoardUpdate, NewBoard};
pub use error::{Error, Result};
pub use principal::{Principal, UserId};
pub use sticky_note::{NewStickyNote, Point2D, StickyNote, StickyNoteFilter, StickyNoteUpdate};
pub use traits::{BoardStore, CredentialStore, CredentialVerifier, StickyNoteStore};
pub use user::{Credential, CredentialUpdate, NewCredential, User};
