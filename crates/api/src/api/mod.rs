// HTTP API routes
//
// This module contains all HTTP route handlers for the public API.
// Each submodule handles a specific resource type with its own AppState.

pub mod boards;
pub mod common;
pub mod sticky_notes;
pub mod users;
pub mod validation;

// Re-export common types
pub use common::{ApiError, ErrorResponse, ListResponse};
