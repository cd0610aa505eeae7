// Sticky note domain types
//
// Notes belong to exactly one board. Whoever owns the board owns its notes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A point on the board canvas
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Sticky note placed on a board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct StickyNote {
    /// Unique identifier for the note.
    pub id: Uuid,
    /// Board the note is placed on.
    pub board_id: Uuid,
    /// Position of the note on the canvas.
    pub pos: Point2D,
    /// Size of the note (width, height).
    pub geo: Point2D,
    /// Note text.
    pub description: String,
    /// Display color (e.g. "#ffeb3b" or "yellow").
    pub color: String,
    /// Free-form tag.
    pub tag: String,
}

/// Input for persisting a new note
#[derive(Debug, Clone)]
pub struct NewStickyNote {
    pub board_id: Uuid,
    pub pos: Point2D,
    pub geo: Point2D,
    pub description: String,
    pub color: String,
    pub tag: String,
}

/// Partial note update
#[derive(Debug, Clone, Default)]
pub struct StickyNoteUpdate {
    pub board_id: Option<Uuid>,
    pub pos: Option<Point2D>,
    pub geo: Option<Point2D>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub tag: Option<String>,
}

/// Filter for listing notes
#[derive(Debug, Clone, Default)]
pub struct StickyNoteFilter {
    pub board_id: Option<Uuid>,
    pub color: Option<String>,
}

impl StickyNoteFilter {
    /// Whether a note passes this filter
    pub fn matches(&self, note: &StickyNote) -> bool {
        self.board_id.is_none_or(|id| note.board_id == id)
            && self.color.as_deref().is_none_or(|c| note.color == c)
    }
}
