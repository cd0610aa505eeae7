// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use corkboard_core::{Board, Credential, Point2D, StickyNote};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for Credential {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct BoardRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub owner_user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BoardRow> for Board {
    fn from(row: BoardRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            owner_user_id: row.owner_user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Points are stored as flat x/y columns
#[derive(Debug, Clone, FromRow)]
pub struct StickyNoteRow {
    pub id: Uuid,
    pub board_id: Uuid,
    pub pos_x: f64,
    pub pos_y: f64,
    pub geo_x: f64,
    pub geo_y: f64,
    pub description: String,
    pub color: String,
    pub tag: String,
}

impl From<StickyNoteRow> for StickyNote {
    fn from(row: StickyNoteRow) -> Self {
        Self {
            id: row.id,
            board_id: row.board_id,
            pos: Point2D::new(row.pos_x, row.pos_y),
            geo: Point2D::new(row.geo_x, row.geo_y),
            description: row.description,
            color: row.color,
            tag: row.tag,
        }
    }
}
