// Sticky note service
// Decision: A note is owned by whoever owns its board
// Decision: Moving a note requires owning both the current and the destination board
// Decision: Position and size change only when both coordinates are supplied

use corkboard_core::{
    BoardStore, Error, NewStickyNote, Point2D, Principal, Result, StickyNote, StickyNoteFilter,
    StickyNoteStore, StickyNoteUpdate,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::sticky_notes::{CreateStickyNoteRequest, StickyNoteQuery, UpdateStickyNoteRequest};
use crate::auth::guard::require_owner;

pub struct StickyNoteService {
    notes: Arc<dyn StickyNoteStore>,
    boards: Arc<dyn BoardStore>,
}

impl StickyNoteService {
    pub fn new(notes: Arc<dyn StickyNoteStore>, boards: Arc<dyn BoardStore>) -> Self {
        Self { notes, boards }
    }

    /// List notes. A note id takes precedence over the other filters.
    pub async fn list(&self, query: StickyNoteQuery) -> Result<Vec<StickyNote>> {
        if let Some(id) = query.id {
            return Ok(self.notes.get(id).await?.into_iter().collect());
        }
        self.notes
            .list(StickyNoteFilter {
                board_id: query.board_id,
                color: query.color,
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<StickyNote> {
        self.notes
            .get(id)
            .await?
            .ok_or_else(|| Error::not_found("Sticky note", id))
    }

    pub async fn create(
        &self,
        principal: &Principal,
        req: CreateStickyNoteRequest,
    ) -> Result<StickyNote> {
        self.require_board_owner(req.board_id, principal).await?;

        let note = self
            .notes
            .save(NewStickyNote {
                board_id: req.board_id,
                pos: Point2D::new(req.pos_x, req.pos_y),
                geo: Point2D::new(req.geo_x, req.geo_y),
                description: req.description,
                color: req.color,
                tag: req.tag,
            })
            .await?;

        tracing::info!(note_id = %note.id, board_id = %note.board_id, "Sticky note created");
        Ok(note)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        req: UpdateStickyNoteRequest,
    ) -> Result<StickyNote> {
        let note = self.get(id).await?;
        self.require_board_owner(note.board_id, principal).await?;

        if let Some(target) = req.board_id.filter(|b| *b != note.board_id) {
            self.require_board_owner(target, principal).await?;
        }

        let input = StickyNoteUpdate {
            board_id: req.board_id,
            pos: both(req.pos_x, req.pos_y),
            geo: both(req.geo_x, req.geo_y),
            description: req.description,
            color: req.color,
            tag: req.tag,
        };
        self.notes
            .update(id, input)
            .await?
            .ok_or_else(|| Error::not_found("Sticky note", id))
    }

    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<()> {
        let note = self.get(id).await?;
        self.require_board_owner(note.board_id, principal).await?;

        if !self.notes.delete(id).await? {
            return Err(Error::not_found("Sticky note", id));
        }
        tracing::info!(note_id = %id, "Sticky note deleted");
        Ok(())
    }

    async fn require_board_owner(&self, board_id: Uuid, principal: &Principal) -> Result<()> {
        let board = self
            .boards
            .get(board_id)
            .await?
            .ok_or_else(|| Error::not_found("Board", board_id))?;
        require_owner(board.owner_user_id, principal)
    }
}

fn both(x: Option<f64>, y: Option<f64>) -> Option<Point2D> {
    match (x, y) {
        (Some(x), Some(y)) => Some(Point2D::new(x, y)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageBackend;
    use corkboard_core::{Board, NewBoard};

    struct Fixture {
        service: StickyNoteService,
        backend: Arc<StorageBackend>,
    }

    impl Fixture {
        fn new() -> Self {
            let backend = Arc::new(StorageBackend::in_memory());
            let service = StickyNoteService::new(backend.clone(), backend.clone());
            Self { service, backend }
        }

        async fn board(&self, owner: i64) -> Board {
            BoardStore::save(
                self.backend.as_ref(),
                NewBoard {
                    title: "Board".to_string(),
                    description: None,
                    owner_user_id: owner,
                },
            )
            .await
            .unwrap()
        }
    }

    fn create_req(board_id: Uuid, color: &str) -> CreateStickyNoteRequest {
        CreateStickyNoteRequest {
            board_id,
            pos_x: 10.0,
            pos_y: 20.0,
            geo_x: 200.0,
            geo_y: 150.0,
            description: "Ship it".to_string(),
            color: color.to_string(),
            tag: "release".to_string(),
        }
    }

    #[tokio::test]
    async fn test_owner_creates_note() {
        let fx = Fixture::new();
        let board = fx.board(42).await;

        let note = fx
            .service
            .create(&Principal::new(42), create_req(board.id, "yellow"))
            .await
            .unwrap();
        assert_eq!(note.board_id, board.id);
        assert_eq!(note.pos, Point2D::new(10.0, 20.0));
    }

    #[tokio::test]
    async fn test_non_owner_cannot_create() {
        let fx = Fixture::new();
        let board = fx.board(42).await;

        let result = fx
            .service
            .create(&Principal::new(7), create_req(board.id, "yellow"))
            .await;
        assert!(matches!(result, Err(Error::Forbidden)));
        assert!(fx
            .service
            .list(StickyNoteQuery::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_create_on_missing_board() {
        let fx = Fixture::new();
        let result = fx
            .service
            .create(&Principal::new(1), create_req(Uuid::now_v7(), "yellow"))
            .await;
        assert!(matches!(result, Err(Error::NotFound { resource: "Board", .. })));
    }

    #[tokio::test]
    async fn test_partial_position_is_ignored() {
        let fx = Fixture::new();
        let board = fx.board(42).await;
        let owner = Principal::new(42);
        let note = fx
            .service
            .create(&owner, create_req(board.id, "yellow"))
            .await
            .unwrap();

        let updated = fx
            .service
            .update(
                &owner,
                note.id,
                UpdateStickyNoteRequest {
                    pos_x: Some(99.0),
                    geo_x: Some(300.0),
                    geo_y: Some(250.0),
                    color: Some("pink".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.pos, Point2D::new(10.0, 20.0));
        assert_eq!(updated.geo, Point2D::new(300.0, 250.0));
        assert_eq!(updated.color, "pink");
        assert_eq!(updated.description, "Ship it");
    }

    #[tokio::test]
    async fn test_non_owner_update_leaves_note_untouched() {
        let fx = Fixture::new();
        let board = fx.board(42).await;
        let note = fx
            .service
            .create(&Principal::new(42), create_req(board.id, "yellow"))
            .await
            .unwrap();

        let result = fx
            .service
            .update(
                &Principal::new(7),
                note.id,
                UpdateStickyNoteRequest {
                    description: Some("defaced".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(Error::Forbidden)));
        assert_eq!(fx.service.get(note.id).await.unwrap(), note);
    }

    #[tokio::test]
    async fn test_move_requires_owning_destination() {
        let fx = Fixture::new();
        let mine = fx.board(42).await;
        let theirs = fx.board(7).await;
        let also_mine = fx.board(42).await;
        let owner = Principal::new(42);
        let note = fx
            .service
            .create(&owner, create_req(mine.id, "yellow"))
            .await
            .unwrap();

        let result = fx
            .service
            .update(
                &owner,
                note.id,
                UpdateStickyNoteRequest {
                    board_id: Some(theirs.id),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(Error::Forbidden)));
        assert_eq!(fx.service.get(note.id).await.unwrap().board_id, mine.id);

        let moved = fx
            .service
            .update(
                &owner,
                note.id,
                UpdateStickyNoteRequest {
                    board_id: Some(also_mine.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.board_id, also_mine.id);
    }

    #[tokio::test]
    async fn test_delete_checks_board_owner() {
        let fx = Fixture::new();
        let board = fx.board(42).await;
        let note = fx
            .service
            .create(&Principal::new(42), create_req(board.id, "yellow"))
            .await
            .unwrap();

        assert!(matches!(
            fx.service.delete(&Principal::new(7), note.id).await,
            Err(Error::Forbidden)
        ));
        fx.service.delete(&Principal::new(42), note.id).await.unwrap();
        assert!(matches!(
            fx.service.get(note.id).await,
            Err(Error::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_precedence() {
        let fx = Fixture::new();
        let board_a = fx.board(1).await;
        let board_b = fx.board(1).await;
        let owner = Principal::new(1);
        let yellow_a = fx
            .service
            .create(&owner, create_req(board_a.id, "yellow"))
            .await
            .unwrap();
        fx.service
            .create(&owner, create_req(board_a.id, "blue"))
            .await
            .unwrap();
        fx.service
            .create(&owner, create_req(board_b.id, "yellow"))
            .await
            .unwrap();

        let by_id = fx
            .service
            .list(StickyNoteQuery {
                id: Some(yellow_a.id),
                board_id: Some(board_b.id),
                color: None,
            })
            .await
            .unwrap();
        assert_eq!(by_id, vec![yellow_a]);

        let by_color = fx
            .service
            .list(StickyNoteQuery {
                color: Some("yellow".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_color.len(), 2);

        let by_board_and_color = fx
            .service
            .list(StickyNoteQuery {
                board_id: Some(board_a.id),
                color: Some("yellow".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_board_and_color.len(), 1);
    }

    #[test]
    fn test_both_coordinates_required() {
        assert_eq!(both(Some(1.0), Some(2.0)), Some(Point2D::new(1.0, 2.0)));
        assert_eq!(both(Some(1.0), None), None);
        assert_eq!(both(None, Some(2.0)), None);
    }
}
