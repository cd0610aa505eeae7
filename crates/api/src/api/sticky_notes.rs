// Sticky note HTTP routes
// Decision: Notes inherit ownership from their board; there is no per-note owner

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use corkboard_core::StickyNote;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::{ApiError, ErrorResponse, ListResponse};
use super::validation::{validate_new_note_color, validate_note_color, validate_note_tag};
use crate::auth::{AuthState, AuthUser};
use crate::services::StickyNoteService;

/// Request to place a note on a board
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateStickyNoteRequest {
    /// Board to place the note on. The caller must own it.
    pub board_id: Uuid,
    #[schema(example = 120.0)]
    pub pos_x: f64,
    #[schema(example = 80.0)]
    pub pos_y: f64,
    /// Width of the note
    #[schema(example = 200.0)]
    pub geo_x: f64,
    /// Height of the note
    #[schema(example = 150.0)]
    pub geo_y: f64,
    #[serde(default)]
    #[schema(example = "Follow up with design")]
    pub description: String,
    #[schema(example = "#ffeb3b")]
    pub color: String,
    #[serde(default)]
    #[schema(example = "todo")]
    pub tag: String,
}

/// Request to update a note. Only provided fields are changed.
///
/// Position and size are applied only when both of their coordinates are given.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateStickyNoteRequest {
    /// Move the note to another board. The caller must own both boards.
    #[serde(default)]
    pub board_id: Option<Uuid>,
    #[serde(default)]
    pub pos_x: Option<f64>,
    #[serde(default)]
    pub pos_y: Option<f64>,
    #[serde(default)]
    pub geo_x: Option<f64>,
    #[serde(default)]
    pub geo_y: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

/// Query parameters for listing notes
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StickyNoteQuery {
    /// Fetch a single note; other filters are ignored when set
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub board_id: Option<Uuid>,
    #[serde(default)]
    pub color: Option<String>,
}

/// App state for sticky note routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<StickyNoteService>,
    pub auth: AuthState,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(input: &AppState) -> Self {
        input.auth.clone()
    }
}

/// Create sticky note routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/sticky-notes", get(list_notes).post(create_note))
        .route(
            "/v1/sticky-notes/:note_id",
            put(update_note).get(get_note).delete(delete_note),
        )
        .with_state(state)
}

/// GET /v1/sticky-notes - List notes by id, board and/or color
#[utoipa::path(
    get,
    path = "/v1/sticky-notes",
    params(
        ("id" = Option<Uuid>, Query, description = "Note ID; takes precedence over other filters"),
        ("board_id" = Option<Uuid>, Query, description = "Only notes on this board"),
        ("color" = Option<String>, Query, description = "Only notes of this color")
    ),
    responses(
        (status = 200, description = "List of notes", body = ListResponse<StickyNote>),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "sticky-notes"
)]
pub async fn list_notes(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<StickyNoteQuery>,
) -> Result<Json<ListResponse<StickyNote>>, ApiError> {
    let notes = state.service.list(query).await?;
    Ok(Json(notes.into()))
}

/// GET /v1/sticky-notes/{note_id} - Get a note
#[utoipa::path(
    get,
    path = "/v1/sticky-notes/{note_id}",
    params(("note_id" = Uuid, Path, description = "Note ID")),
    responses(
        (status = 200, description = "Note found", body = StickyNote),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "sticky-notes"
)]
pub async fn get_note(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(note_id): Path<Uuid>,
) -> Result<Json<StickyNote>, ApiError> {
    Ok(Json(state.service.get(note_id).await?))
}

/// POST /v1/sticky-notes - Place a note on a board (board owner only)
#[utoipa::path(
    post,
    path = "/v1/sticky-notes",
    request_body = CreateStickyNoteRequest,
    responses(
        (status = 201, description = "Note created", body = StickyNote),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Not the board owner", body = ErrorResponse),
        (status = 404, description = "Board not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "sticky-notes"
)]
pub async fn create_note(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Json(req): Json<CreateStickyNoteRequest>,
) -> Result<(StatusCode, Json<StickyNote>), ApiError> {
    validate_new_note_color(&req.color)?;
    validate_note_tag(&req.tag)?;

    let note = state.service.create(&principal, req).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// PUT /v1/sticky-notes/{note_id} - Update or move a note (board owner only)
#[utoipa::path(
    put,
    path = "/v1/sticky-notes/{note_id}",
    params(("note_id" = Uuid, Path, description = "Note ID")),
    request_body = UpdateStickyNoteRequest,
    responses(
        (status = 200, description = "Note updated", body = StickyNote),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Not the owner of the current or destination board", body = ErrorResponse),
        (status = 404, description = "Note or board not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "sticky-notes"
)]
pub async fn update_note(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(note_id): Path<Uuid>,
    Json(req): Json<UpdateStickyNoteRequest>,
) -> Result<Json<StickyNote>, ApiError> {
    if let Some(color) = &req.color {
        validate_note_color(color)?;
    }
    if let Some(tag) = &req.tag {
        validate_note_tag(tag)?;
    }

    let note = state.service.update(&principal, note_id, req).await?;
    Ok(Json(note))
}

/// DELETE /v1/sticky-notes/{note_id} - Remove a note (board owner only)
#[utoipa::path(
    delete,
    path = "/v1/sticky-notes/{note_id}",
    params(("note_id" = Uuid, Path, description = "Note ID")),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Not the board owner", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "sticky-notes"
)]
pub async fn delete_note(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(note_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(&principal, note_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let req: CreateStickyNoteRequest = serde_json::from_str(
            r#"{
                "board_id": "0190f5a0-0000-7000-8000-000000000001",
                "pos_x": 1.0, "pos_y": 2.0, "geo_x": 100.0, "geo_y": 80.0,
                "color": "yellow"
            }"#,
        )
        .unwrap();
        assert_eq!(req.description, "");
        assert_eq!(req.tag, "");
        assert_eq!(req.color, "yellow");
    }

    #[test]
    fn test_create_request_requires_coordinates() {
        let result: Result<CreateStickyNoteRequest, _> = serde_json::from_str(
            r#"{"board_id": "0190f5a0-0000-7000-8000-000000000001", "color": "yellow"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_is_sparse() {
        let req: UpdateStickyNoteRequest =
            serde_json::from_str(r#"{"pos_x": 5.0, "tag": "done"}"#).unwrap();
        assert_eq!(req.pos_x, Some(5.0));
        assert_eq!(req.pos_y, None);
        assert_eq!(req.tag.as_deref(), Some("done"));
        assert!(req.board_id.is_none());
    }
}
