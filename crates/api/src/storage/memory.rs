// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access; no lock is held across an await
// Decision: User ids come from an atomic counter, board and note ids are uuid v7 (time-ordered)
// Decision: Lock order is users -> boards -> notes
//
// This implementation mirrors the PostgreSQL repository with in-memory
// HashMaps, allowing the server to run without a database for development.

use chrono::Utc;
use corkboard_core::{
    Board, BoardUpdate, Credential, CredentialUpdate, Error, NewBoard, NewCredential,
    NewStickyNote, Result, StickyNote, StickyNoteFilter, StickyNoteUpdate, UserId,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use uuid::Uuid;

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
pub struct InMemoryDatabase {
    users: RwLock<HashMap<UserId, Credential>>,
    boards: RwLock<HashMap<Uuid, Board>>,
    notes: RwLock<HashMap<Uuid, StickyNote>>,
    next_user_id: AtomicI64,
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            boards: RwLock::new(HashMap::new()),
            notes: RwLock::new(HashMap::new()),
            next_user_id: AtomicI64::new(1),
        }
    }
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: NewCredential) -> Result<Credential> {
        let mut users = self.users.write();
        if users.values().any(|u| u.username == input.username) {
            return Err(Error::UsernameTaken(input.username));
        }
        if users.values().any(|u| u.email == input.email) {
            return Err(Error::EmailTaken(input.email));
        }

        let now = Utc::now();
        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        let credential = Credential {
            id,
            username: input.username,
            email: input.email,
            password_hash: input.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(id, credential.clone());
        Ok(credential)
    }

    pub async fn get_user(&self, id: UserId) -> Result<Option<Credential>> {
        Ok(self.users.read().get(&id).cloned())
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<Credential>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<Credential>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    pub async fn update_user(
        &self,
        id: UserId,
        input: CredentialUpdate,
    ) -> Result<Option<Credential>> {
        let mut users = self.users.write();

        if let Some(username) = &input.username {
            if users.values().any(|u| u.id != id && &u.username == username) {
                return Err(Error::UsernameTaken(username.clone()));
            }
        }
        if let Some(email) = &input.email {
            if users.values().any(|u| u.id != id && &u.email == email) {
                return Err(Error::EmailTaken(email.clone()));
            }
        }

        if let Some(user) = users.get_mut(&id) {
            if let Some(username) = input.username {
                user.username = username;
            }
            if let Some(email) = input.email {
                user.email = email;
            }
            if let Some(password_hash) = input.password_hash {
                user.password_hash = password_hash;
            }
            user.updated_at = Utc::now();
            return Ok(Some(user.clone()));
        }
        Ok(None)
    }

    /// Delete a user together with their boards and those boards' notes
    pub async fn delete_user(&self, id: UserId) -> Result<bool> {
        let mut users = self.users.write();
        if users.remove(&id).is_none() {
            return Ok(false);
        }

        let mut boards = self.boards.write();
        let owned: Vec<Uuid> = boards
            .values()
            .filter(|b| b.owner_user_id == id)
            .map(|b| b.id)
            .collect();
        for board_id in &owned {
            boards.remove(board_id);
        }
        self.notes
            .write()
            .retain(|_, note| !owned.contains(&note.board_id));

        Ok(true)
    }

    pub async fn list_users(&self) -> Result<Vec<Credential>> {
        let mut result: Vec<_> = self.users.read().values().cloned().collect();
        result.sort_by_key(|u| u.id);
        Ok(result)
    }

    // ============================================
    // Boards
    // ============================================

    pub async fn create_board(&self, input: NewBoard) -> Result<Board> {
        let now = Utc::now();
        let board = Board {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            owner_user_id: input.owner_user_id,
            created_at: now,
            updated_at: now,
        };
        self.boards.write().insert(board.id, board.clone());
        Ok(board)
    }

    pub async fn get_board(&self, id: Uuid) -> Result<Option<Board>> {
        Ok(self.boards.read().get(&id).cloned())
    }

    pub async fn list_boards(&self) -> Result<Vec<Board>> {
        let mut result: Vec<_> = self.boards.read().values().cloned().collect();
        result.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(result)
    }

    pub async fn list_boards_by_owner(&self, owner_id: UserId) -> Result<Vec<Board>> {
        let mut result: Vec<_> = self
            .boards
            .read()
            .values()
            .filter(|b| b.owner_user_id == owner_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(result)
    }

    pub async fn update_board(&self, id: Uuid, input: BoardUpdate) -> Result<Option<Board>> {
        let mut boards = self.boards.write();
        if let Some(board) = boards.get_mut(&id) {
            if let Some(title) = input.title {
                board.title = title;
            }
            if let Some(description) = input.description {
                board.description = Some(description);
            }
            board.updated_at = Utc::now();
            return Ok(Some(board.clone()));
        }
        Ok(None)
    }

    /// Delete a board and its notes
    pub async fn delete_board(&self, id: Uuid) -> Result<bool> {
        let mut boards = self.boards.write();
        if boards.remove(&id).is_none() {
            return Ok(false);
        }
        self.notes.write().retain(|_, note| note.board_id != id);
        Ok(true)
    }

    // ============================================
    // Sticky notes
    // ============================================

    pub async fn create_note(&self, input: NewStickyNote) -> Result<StickyNote> {
        // Held until the insert so a concurrent delete_board cannot orphan the note
        let boards = self.boards.read();
        if !boards.contains_key(&input.board_id) {
            return Err(missing_board());
        }
        let note = StickyNote {
            id: Uuid::now_v7(),
            board_id: input.board_id,
            pos: input.pos,
            geo: input.geo,
            description: input.description,
            color: input.color,
            tag: input.tag,
        };
        self.notes.write().insert(note.id, note.clone());
        Ok(note)
    }

    pub async fn get_note(&self, id: Uuid) -> Result<Option<StickyNote>> {
        Ok(self.notes.read().get(&id).cloned())
    }

    pub async fn list_notes(&self, filter: &StickyNoteFilter) -> Result<Vec<StickyNote>> {
        let mut result: Vec<_> = self
            .notes
            .read()
            .values()
            .filter(|n| filter.matches(n))
            .cloned()
            .collect();
        result.sort_by_key(|n| n.id);
        Ok(result)
    }

    pub async fn update_note(
        &self,
        id: Uuid,
        input: StickyNoteUpdate,
    ) -> Result<Option<StickyNote>> {
        let boards = self.boards.read();
        if let Some(board_id) = input.board_id {
            if !boards.contains_key(&board_id) {
                return Err(missing_board());
            }
        }
        let mut notes = self.notes.write();
        if let Some(note) = notes.get_mut(&id) {
            if let Some(board_id) = input.board_id {
                note.board_id = board_id;
            }
            if let Some(pos) = input.pos {
                note.pos = pos;
            }
            if let Some(geo) = input.geo {
                note.geo = geo;
            }
            if let Some(description) = input.description {
                note.description = description;
            }
            if let Some(color) = input.color {
                note.color = color;
            }
            if let Some(tag) = input.tag {
                note.tag = tag;
            }
            return Ok(Some(note.clone()));
        }
        Ok(None)
    }

    pub async fn delete_note(&self, id: Uuid) -> Result<bool> {
        Ok(self.notes.write().remove(&id).is_some())
    }
}

/// Same error the Postgres store reports on a foreign key violation
fn missing_board() -> Error {
    Error::validation("Referenced record does not exist")
}

#[cfg(test)]
mod tests {
    use super::*;
    use corkboard_core::Point2D;

    fn new_user(username: &str) -> NewCredential {
        NewCredential {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: "hash".to_string(),
        }
    }

    fn new_note(board_id: Uuid, color: &str) -> NewStickyNote {
        NewStickyNote {
            board_id,
            pos: Point2D::new(1.0, 2.0),
            geo: Point2D::new(120.0, 90.0),
            description: "note".to_string(),
            color: color.to_string(),
            tag: "tag".to_string(),
        }
    }

    async fn new_board(db: &InMemoryDatabase, title: &str) -> Uuid {
        db.create_board(NewBoard {
            title: title.to_string(),
            description: None,
            owner_user_id: 1,
        })
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_user_ids_are_sequential() {
        let db = InMemoryDatabase::new();
        let alice = db.create_user(new_user("alice")).await.unwrap();
        let bob = db.create_user(new_user("bob")).await.unwrap();

        assert_eq!(alice.id, 1);
        assert_eq!(bob.id, 2);
        assert_eq!(
            db.get_user_by_username("bob").await.unwrap().unwrap().id,
            bob.id
        );
        assert!(db.get_user_by_email("alice@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let db = InMemoryDatabase::new();
        db.create_user(new_user("alice")).await.unwrap();

        let mut dup = new_user("alice");
        dup.email = "other@example.com".to_string();
        assert!(matches!(
            db.create_user(dup).await,
            Err(Error::UsernameTaken(_))
        ));
        assert_eq!(db.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_user_keeps_unset_fields() {
        let db = InMemoryDatabase::new();
        let alice = db.create_user(new_user("alice")).await.unwrap();

        let updated = db
            .update_user(
                alice.id,
                CredentialUpdate {
                    email: Some("alice@new.example".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.username, "alice");
        assert_eq!(updated.email, "alice@new.example");

        assert!(db
            .update_user(99, CredentialUpdate::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_board_removes_notes() {
        let db = InMemoryDatabase::new();
        let board = db
            .create_board(NewBoard {
                title: "Retro".to_string(),
                description: None,
                owner_user_id: 1,
            })
            .await
            .unwrap();
        let note = db.create_note(new_note(board.id, "yellow")).await.unwrap();

        assert!(db.delete_board(board.id).await.unwrap());
        assert!(db.get_note(note.id).await.unwrap().is_none());
        assert!(!db.delete_board(board.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_user_cascades() {
        let db = InMemoryDatabase::new();
        let alice = db.create_user(new_user("alice")).await.unwrap();
        let bob = db.create_user(new_user("bob")).await.unwrap();

        let alice_board = db
            .create_board(NewBoard {
                title: "Alice".to_string(),
                description: None,
                owner_user_id: alice.id,
            })
            .await
            .unwrap();
        let bob_board = db
            .create_board(NewBoard {
                title: "Bob".to_string(),
                description: None,
                owner_user_id: bob.id,
            })
            .await
            .unwrap();
        db.create_note(new_note(alice_board.id, "pink")).await.unwrap();
        db.create_note(new_note(bob_board.id, "pink")).await.unwrap();

        assert!(db.delete_user(alice.id).await.unwrap());
        assert!(db.get_board(alice_board.id).await.unwrap().is_none());
        assert!(db.get_board(bob_board.id).await.unwrap().is_some());

        let remaining = db.list_notes(&StickyNoteFilter::default()).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].board_id, bob_board.id);
    }

    #[tokio::test]
    async fn test_list_notes_with_filter() {
        let db = InMemoryDatabase::new();
        let board_a = new_board(&db, "A").await;
        let board_b = new_board(&db, "B").await;
        db.create_note(new_note(board_a, "yellow")).await.unwrap();
        db.create_note(new_note(board_a, "blue")).await.unwrap();
        db.create_note(new_note(board_b, "yellow")).await.unwrap();

        let on_a = db
            .list_notes(&StickyNoteFilter {
                board_id: Some(board_a),
                color: None,
            })
            .await
            .unwrap();
        assert_eq!(on_a.len(), 2);

        let yellow_on_a = db
            .list_notes(&StickyNoteFilter {
                board_id: Some(board_a),
                color: Some("yellow".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(yellow_on_a.len(), 1);
    }

    #[tokio::test]
    async fn test_note_requires_existing_board() {
        let db = InMemoryDatabase::new();
        let missing = Uuid::now_v7();

        let err = db.create_note(new_note(missing, "yellow")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.to_string(), "Referenced record does not exist");
        assert!(db
            .list_notes(&StickyNoteFilter::default())
            .await
            .unwrap()
            .is_empty());

        let board = new_board(&db, "Retro").await;
        let note = db.create_note(new_note(board, "yellow")).await.unwrap();
        let moved = db
            .update_note(
                note.id,
                StickyNoteUpdate {
                    board_id: Some(missing),
                    color: Some("blue".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(moved, Err(Error::Validation(_))));

        let unchanged = db.get_note(note.id).await.unwrap().unwrap();
        assert_eq!(unchanged.board_id, board);
        assert_eq!(unchanged.color, "yellow");

        assert!(db.delete_board(board).await.unwrap());
        assert!(matches!(
            db.create_note(new_note(board, "pink")).await,
            Err(Error::Validation(_))
        ));
        assert!(db
            .list_notes(&StickyNoteFilter::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_boards_listed_newest_first() {
        let db = InMemoryDatabase::new();
        let first = db
            .create_board(NewBoard {
                title: "First".to_string(),
                description: None,
                owner_user_id: 1,
            })
            .await
            .unwrap();
        let second = db
            .create_board(NewBoard {
                title: "Second".to_string(),
                description: Some("later".to_string()),
                owner_user_id: 2,
            })
            .await
            .unwrap();

        let all = db.list_boards().await.unwrap();
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);

        let owned = db.list_boards_by_owner(1).await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].id, first.id);
    }
}
