// Repository layer for database operations
// Decision: Every query runs under STORE_TIMEOUT; timeouts and connection failures become StoreUnavailable
// Decision: Cascading deletes are left to the foreign keys in the migrations

use std::future::Future;
use std::time::Duration;

use corkboard_core::{
    Board, BoardUpdate, Credential, CredentialUpdate, Error, NewBoard, NewCredential,
    NewStickyNote, Result, StickyNote, StickyNoteFilter, StickyNoteUpdate, UserId,
};
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use super::models::{BoardRow, StickyNoteRow, UserRow};

/// Upper bound for a single store call
pub const STORE_TIMEOUT: Duration = Duration::from_secs(5);

const MAX_CONNECTIONS: u32 = 10;

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";
const BOARD_COLUMNS: &str = "id, title, description, owner_user_id, created_at, updated_at";
const NOTE_COLUMNS: &str = "id, board_id, pos_x, pos_y, geo_x, geo_y, description, color, tag";

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(STORE_TIMEOUT)
            .connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self { pool })
    }

    /// Apply embedded migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
        Ok(())
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: NewCredential) -> Result<Credential> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );
        let result = tokio::time::timeout(
            STORE_TIMEOUT,
            sqlx::query_as::<_, UserRow>(&query)
                .bind(&input.username)
                .bind(&input.email)
                .bind(&input.password_hash)
                .fetch_one(&self.pool),
        )
        .await
        .map_err(|_| timed_out())?;

        result
            .map(Credential::from)
            .map_err(|e| map_user_write_error(e, &input.username, &input.email))
    }

    pub async fn get_user(&self, id: UserId) -> Result<Option<Credential>> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = bounded(
            sqlx::query_as::<_, UserRow>(&query)
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await?;
        Ok(row.map(Credential::from))
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<Credential>> {
        let query = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
        let row = bounded(
            sqlx::query_as::<_, UserRow>(&query)
                .bind(username)
                .fetch_optional(&self.pool),
        )
        .await?;
        Ok(row.map(Credential::from))
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<Credential>> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let row = bounded(
            sqlx::query_as::<_, UserRow>(&query)
                .bind(email)
                .fetch_optional(&self.pool),
        )
        .await?;
        Ok(row.map(Credential::from))
    }

    pub async fn update_user(
        &self,
        id: UserId,
        input: CredentialUpdate,
    ) -> Result<Option<Credential>> {
        let query = format!(
            r#"
            UPDATE users
            SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let username = input.username.clone().unwrap_or_default();
        let email = input.email.clone().unwrap_or_default();
        let result = tokio::time::timeout(
            STORE_TIMEOUT,
            sqlx::query_as::<_, UserRow>(&query)
                .bind(id)
                .bind(&input.username)
                .bind(&input.email)
                .bind(&input.password_hash)
                .fetch_optional(&self.pool),
        )
        .await
        .map_err(|_| timed_out())?;

        result
            .map(|row| row.map(Credential::from))
            .map_err(|e| map_user_write_error(e, &username, &email))
    }

    pub async fn delete_user(&self, id: UserId) -> Result<bool> {
        let result = bounded(
            sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(id)
                .execute(&self.pool),
        )
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_users(&self) -> Result<Vec<Credential>> {
        let query = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        let rows = bounded(sqlx::query_as::<_, UserRow>(&query).fetch_all(&self.pool)).await?;
        Ok(rows.into_iter().map(Credential::from).collect())
    }

    // ============================================
    // Boards
    // ============================================

    pub async fn create_board(&self, input: NewBoard) -> Result<Board> {
        let query = format!(
            r#"
            INSERT INTO boards (id, title, description, owner_user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            BOARD_COLUMNS
        );
        let row = bounded(
            sqlx::query_as::<_, BoardRow>(&query)
                .bind(Uuid::now_v7())
                .bind(&input.title)
                .bind(&input.description)
                .bind(input.owner_user_id)
                .fetch_one(&self.pool),
        )
        .await?;
        Ok(row.into())
    }

    pub async fn get_board(&self, id: Uuid) -> Result<Option<Board>> {
        let query = format!("SELECT {} FROM boards WHERE id = $1", BOARD_COLUMNS);
        let row = bounded(
            sqlx::query_as::<_, BoardRow>(&query)
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await?;
        Ok(row.map(Board::from))
    }

    pub async fn list_boards(&self) -> Result<Vec<Board>> {
        let query = format!("SELECT {} FROM boards ORDER BY id DESC", BOARD_COLUMNS);
        let rows = bounded(sqlx::query_as::<_, BoardRow>(&query).fetch_all(&self.pool)).await?;
        Ok(rows.into_iter().map(Board::from).collect())
    }

    pub async fn list_boards_by_owner(&self, owner_id: UserId) -> Result<Vec<Board>> {
        let query = format!(
            "SELECT {} FROM boards WHERE owner_user_id = $1 ORDER BY id DESC",
            BOARD_COLUMNS
        );
        let rows = bounded(
            sqlx::query_as::<_, BoardRow>(&query)
                .bind(owner_id)
                .fetch_all(&self.pool),
        )
        .await?;
        Ok(rows.into_iter().map(Board::from).collect())
    }

    pub async fn update_board(&self, id: Uuid, input: BoardUpdate) -> Result<Option<Board>> {
        let query = format!(
            r#"
            UPDATE boards
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            BOARD_COLUMNS
        );
        let row = bounded(
            sqlx::query_as::<_, BoardRow>(&query)
                .bind(id)
                .bind(&input.title)
                .bind(&input.description)
                .fetch_optional(&self.pool),
        )
        .await?;
        Ok(row.map(Board::from))
    }

    pub async fn delete_board(&self, id: Uuid) -> Result<bool> {
        let result = bounded(
            sqlx::query("DELETE FROM boards WHERE id = $1")
                .bind(id)
                .execute(&self.pool),
        )
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ============================================
    // Sticky notes
    // ============================================

    pub async fn create_note(&self, input: NewStickyNote) -> Result<StickyNote> {
        let query = format!(
            r#"
            INSERT INTO sticky_notes (id, board_id, pos_x, pos_y, geo_x, geo_y, description, color, tag)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            NOTE_COLUMNS
        );
        let row = bounded(
            sqlx::query_as::<_, StickyNoteRow>(&query)
                .bind(Uuid::now_v7())
                .bind(input.board_id)
                .bind(input.pos.x)
                .bind(input.pos.y)
                .bind(input.geo.x)
                .bind(input.geo.y)
                .bind(&input.description)
                .bind(&input.color)
                .bind(&input.tag)
                .fetch_one(&self.pool),
        )
        .await?;
        Ok(row.into())
    }

    pub async fn get_note(&self, id: Uuid) -> Result<Option<StickyNote>> {
        let query = format!("SELECT {} FROM sticky_notes WHERE id = $1", NOTE_COLUMNS);
        let row = bounded(
            sqlx::query_as::<_, StickyNoteRow>(&query)
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await?;
        Ok(row.map(StickyNote::from))
    }

    pub async fn list_notes(&self, filter: &StickyNoteFilter) -> Result<Vec<StickyNote>> {
        let query = format!(
            r#"
            SELECT {}
            FROM sticky_notes
            WHERE ($1::uuid IS NULL OR board_id = $1)
              AND ($2::text IS NULL OR color = $2)
            ORDER BY id
            "#,
            NOTE_COLUMNS
        );
        let rows = bounded(
            sqlx::query_as::<_, StickyNoteRow>(&query)
                .bind(filter.board_id)
                .bind(&filter.color)
                .fetch_all(&self.pool),
        )
        .await?;
        Ok(rows.into_iter().map(StickyNote::from).collect())
    }

    pub async fn update_note(
        &self,
        id: Uuid,
        input: StickyNoteUpdate,
    ) -> Result<Option<StickyNote>> {
        let query = format!(
            r#"
            UPDATE sticky_notes
            SET
                board_id = COALESCE($2, board_id),
                pos_x = COALESCE($3, pos_x),
                pos_y = COALESCE($4, pos_y),
                geo_x = COALESCE($5, geo_x),
                geo_y = COALESCE($6, geo_y),
                description = COALESCE($7, description),
                color = COALESCE($8, color),
                tag = COALESCE($9, tag)
            WHERE id = $1
            RETURNING {}
            "#,
            NOTE_COLUMNS
        );
        let row = bounded(
            sqlx::query_as::<_, StickyNoteRow>(&query)
                .bind(id)
                .bind(input.board_id)
                .bind(input.pos.map(|p| p.x))
                .bind(input.pos.map(|p| p.y))
                .bind(input.geo.map(|g| g.x))
                .bind(input.geo.map(|g| g.y))
                .bind(&input.description)
                .bind(&input.color)
                .bind(&input.tag)
                .fetch_optional(&self.pool),
        )
        .await?;
        Ok(row.map(StickyNote::from))
    }

    pub async fn delete_note(&self, id: Uuid) -> Result<bool> {
        let result = bounded(
            sqlx::query("DELETE FROM sticky_notes WHERE id = $1")
                .bind(id)
                .execute(&self.pool),
        )
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ============================================
// Error mapping
// ============================================

/// Run a query under STORE_TIMEOUT and map its error
async fn bounded<T, F>(query: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, sqlx::Error>>,
{
    tokio::time::timeout(STORE_TIMEOUT, query)
        .await
        .map_err(|_| timed_out())?
        .map_err(map_sqlx_error)
}

fn timed_out() -> Error {
    tracing::error!(timeout_secs = STORE_TIMEOUT.as_secs(), "Store call timed out");
    Error::store_unavailable("store call timed out")
}

fn map_sqlx_error(err: sqlx::Error) -> Error {
    match err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::WorkerCrashed => {
            tracing::error!(error = %err, "Store unavailable");
            Error::store_unavailable(err.to_string())
        }
        sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
            Error::validation("Referenced record does not exist")
        }
        other => {
            tracing::error!(error = %other, "Database error");
            Error::Internal(other.into())
        }
    }
}

/// Unique violations on users are reported the same way as the pre-insert checks
fn map_user_write_error(err: sqlx::Error, username: &str, email: &str) -> Error {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return match db.constraint() {
                Some(c) if c.contains("email") => Error::EmailTaken(email.to_string()),
                _ => Error::UsernameTaken(username.to_string()),
            };
        }
    }
    map_sqlx_error(err)
}
