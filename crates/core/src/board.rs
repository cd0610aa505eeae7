// Board domain types
//
// A board is owned by the user who created it. The owner is recorded once
// at creation and no update type carries it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::principal::UserId;

/// Board - a named canvas holding sticky notes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Board {
    /// Unique identifier for the board.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Optional longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// User id of the owner. Set at creation, never changed.
    pub owner_user_id: UserId,
    /// Timestamp when the board was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the board was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for persisting a new board
#[derive(Debug, Clone)]
pub struct NewBoard {
    pub title: String,
    pub description: Option<String>,
    pub owner_user_id: UserId,
}

/// Partial board update
#[derive(Debug, Clone, Default)]
pub struct BoardUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
}
