// Board service
// Decision: The owner is always the acting principal; requests cannot name one
// Decision: Ownership is checked after loading and before writing

use corkboard_core::{Board, BoardStore, BoardUpdate, Error, NewBoard, Principal, Result, UserId};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::boards::{CreateBoardRequest, UpdateBoardRequest};
use crate::auth::guard::require_owner;

pub struct BoardService {
    boards: Arc<dyn BoardStore>,
}

impl BoardService {
    pub fn new(boards: Arc<dyn BoardStore>) -> Self {
        Self { boards }
    }

    /// List all boards, or only those of one owner
    pub async fn list(&self, owner_user_id: Option<UserId>) -> Result<Vec<Board>> {
        match owner_user_id {
            Some(owner_id) => self.boards.list_by_owner(owner_id).await,
            None => self.boards.list().await,
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Board> {
        self.boards
            .get(id)
            .await?
            .ok_or_else(|| Error::not_found("Board", id))
    }

    pub async fn create(&self, principal: &Principal, req: CreateBoardRequest) -> Result<Board> {
        let board = self
            .boards
            .save(NewBoard {
                title: req.title.trim().to_string(),
                description: req.description,
                owner_user_id: principal.user_id,
            })
            .await?;

        tracing::info!(board_id = %board.id, owner_user_id = board.owner_user_id, "Board created");
        Ok(board)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        req: UpdateBoardRequest,
    ) -> Result<Board> {
        let board = self.get(id).await?;
        require_owner(board.owner_user_id, principal)?;

        let input = BoardUpdate {
            title: req.title.map(|t| t.trim().to_string()),
            description: req.description,
        };
        self.boards
            .update(id, input)
            .await?
            .ok_or_else(|| Error::not_found("Board", id))
    }

    /// Delete a board and all of its notes
    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<()> {
        let board = self.get(id).await?;
        require_owner(board.owner_user_id, principal)?;

        if !self.boards.delete(id).await? {
            return Err(Error::not_found("Board", id));
        }
        tracing::info!(board_id = %id, "Board deleted");
        Ok(())
    }
}
