// Board HTTP routes
// Decision: Every board route requires a bearer token, reads included
// Decision: The owner is never taken from the request body

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use corkboard_core::{Board, UserId};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::{ApiError, ErrorResponse, ListResponse};
use super::validation::{validate_board_description, validate_board_title};
use crate::auth::{AuthState, AuthUser};
use crate::services::BoardService;

/// Request to create a board
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBoardRequest {
    /// Display title.
    #[schema(example = "Sprint 12 retro")]
    pub title: String,
    /// Optional longer description.
    #[serde(default)]
    #[schema(example = "What went well, what did not")]
    pub description: Option<String>,
}

/// Request to update a board. Only provided fields are changed.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateBoardRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Query parameters for listing boards
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BoardListQuery {
    /// Only boards owned by this user
    #[serde(default)]
    pub owner_user_id: Option<UserId>,
}

/// App state for board routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BoardService>,
    pub auth: AuthState,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(input: &AppState) -> Self {
        input.auth.clone()
    }
}

/// Create board routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/boards", get(list_boards).post(create_board))
        .route(
            "/v1/boards/:board_id",
            get(get_board).put(update_board).delete(delete_board),
        )
        .with_state(state)
}

/// GET /v1/boards - List boards
#[utoipa::path(
    get,
    path = "/v1/boards",
    params(
        ("owner_user_id" = Option<i64>, Query, description = "Only boards owned by this user")
    ),
    responses(
        (status = 200, description = "List of boards", body = ListResponse<Board>),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "boards"
)]
pub async fn list_boards(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<BoardListQuery>,
) -> Result<Json<ListResponse<Board>>, ApiError> {
    let boards = state.service.list(query.owner_user_id).await?;
    Ok(Json(boards.into()))
}

/// GET /v1/boards/{board_id} - Get a board
#[utoipa::path(
    get,
    path = "/v1/boards/{board_id}",
    params(("board_id" = Uuid, Path, description = "Board ID")),
    responses(
        (status = 200, description = "Board found", body = Board),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "Board not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "boards"
)]
pub async fn get_board(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<Json<Board>, ApiError> {
    Ok(Json(state.service.get(board_id).await?))
}

/// POST /v1/boards - Create a board owned by the caller
#[utoipa::path(
    post,
    path = "/v1/boards",
    request_body = CreateBoardRequest,
    responses(
        (status = 201, description = "Board created", body = Board),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "boards"
)]
pub async fn create_board(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Json(req): Json<CreateBoardRequest>,
) -> Result<(StatusCode, Json<Board>), ApiError> {
    validate_board_title(&req.title)?;
    validate_board_description(req.description.as_deref())?;

    let board = state.service.create(&principal, req).await?;
    Ok((StatusCode::CREATED, Json(board)))
}

/// PUT /v1/boards/{board_id} - Update a board (owner only)
#[utoipa::path(
    put,
    path = "/v1/boards/{board_id}",
    params(("board_id" = Uuid, Path, description = "Board ID")),
    request_body = UpdateBoardRequest,
    responses(
        (status = 200, description = "Board updated", body = Board),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Not the board owner", body = ErrorResponse),
        (status = 404, description = "Board not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "boards"
)]
pub async fn update_board(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(board_id): Path<Uuid>,
    Json(req): Json<UpdateBoardRequest>,
) -> Result<Json<Board>, ApiError> {
    if let Some(title) = &req.title {
        validate_board_title(title)?;
    }
    validate_board_description(req.description.as_deref())?;

    let board = state.service.update(&principal, board_id, req).await?;
    Ok(Json(board))
}

/// DELETE /v1/boards/{board_id} - Delete a board and its notes (owner only)
#[utoipa::path(
    delete,
    path = "/v1/boards/{board_id}",
    params(("board_id" = Uuid, Path, description = "Board ID")),
    responses(
        (status = 204, description = "Board deleted"),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Not the board owner", body = ErrorResponse),
        (status = 404, description = "Board not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "boards"
)]
pub async fn delete_board(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(&principal, board_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
