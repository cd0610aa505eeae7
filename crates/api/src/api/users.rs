// Users API routes
// Decision: Any authenticated user may look up others; only the user may change or delete themselves

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use corkboard_core::{User, UserId};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::common::{ApiError, ErrorResponse, ListResponse};
use super::validation::{validate_email, validate_password, validate_username};
use crate::auth::{AuthState, AuthUser};
use crate::services::UserService;

/// Request to update the caller's profile. Only provided fields are changed.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default)]
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[serde(default)]
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
    /// New password; stored only as a hash
    #[serde(default)]
    pub password: Option<String>,
}

/// App state for users routes
#[derive(Clone)]
pub struct UsersState {
    pub service: Arc<UserService>,
    pub auth: AuthState,
}

impl FromRef<UsersState> for AuthState {
    fn from_ref(input: &UsersState) -> Self {
        input.auth.clone()
    }
}

/// Create users routes
pub fn routes(state: UsersState) -> Router {
    Router::new()
        .route("/v1/users", get(list_users))
        .route("/v1/users/me", get(get_me))
        .route("/v1/users/username/:username", get(get_user_by_username))
        .route(
            "/v1/users/:user_id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(state)
}

/// GET /v1/users - List all users
#[utoipa::path(
    get,
    path = "/v1/users",
    responses(
        (status = 200, description = "List of users", body = ListResponse<User>),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<UsersState>,
    _auth: AuthUser,
) -> Result<Json<ListResponse<User>>, ApiError> {
    let users = state.service.list().await?;
    Ok(Json(users.into()))
}

/// GET /v1/users/me - The authenticated user
#[utoipa::path(
    get,
    path = "/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_me(
    State(state): State<UsersState>,
    AuthUser(principal): AuthUser,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.service.me(&principal).await?))
}

/// GET /v1/users/{user_id} - Get a user by id
#[utoipa::path(
    get,
    path = "/v1/users/{user_id}",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<UsersState>,
    _auth: AuthUser,
    Path(user_id): Path<UserId>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.service.get(user_id).await?))
}

/// GET /v1/users/username/{username} - Get a user by username
#[utoipa::path(
    get,
    path = "/v1/users/username/{username}",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_user_by_username(
    State(state): State<UsersState>,
    _auth: AuthUser,
    Path(username): Path<String>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.service.get_by_username(&username).await?))
}

/// PUT /v1/users/{user_id} - Update your own profile
#[utoipa::path(
    put,
    path = "/v1/users/{user_id}",
    params(("user_id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Not your account", body = ErrorResponse),
        (status = 409, description = "Username or email already exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<UsersState>,
    AuthUser(principal): AuthUser,
    Path(user_id): Path<UserId>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    if let Some(username) = &req.username {
        validate_username(username)?;
    }
    if let Some(email) = &req.email {
        validate_email(email)?;
    }
    if let Some(password) = &req.password {
        validate_password(password)?;
    }

    let user = state.service.update(&principal, user_id, req).await?;
    Ok(Json(user))
}

/// DELETE /v1/users/{user_id} - Delete your own account
#[utoipa::path(
    delete,
    path = "/v1/users/{user_id}",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Not your account", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<UsersState>,
    AuthUser(principal): AuthUser,
    Path(user_id): Path<UserId>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(&principal, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
