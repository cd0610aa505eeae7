// OpenAPI specification generation
//
// This module defines the OpenAPI spec for the Corkboard API.
// It is used by both the API server (for Swagger UI)
// and the export-openapi binary (for static spec generation).

use crate::api;
use crate::api::{ErrorResponse, ListResponse};
use crate::auth::routes as auth_routes;
use corkboard_core::{Board, Point2D, StickyNote, User};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Corkboard API
#[derive(OpenApi)]
#[openapi(
    paths(
        auth_routes::register,
        auth_routes::login,
        api::users::list_users,
        api::users::get_me,
        api::users::get_user,
        api::users::get_user_by_username,
        api::users::update_user,
        api::users::delete_user,
        api::boards::list_boards,
        api::boards::get_board,
        api::boards::create_board,
        api::boards::update_board,
        api::boards::delete_board,
        api::sticky_notes::list_notes,
        api::sticky_notes::get_note,
        api::sticky_notes::create_note,
        api::sticky_notes::update_note,
        api::sticky_notes::delete_note,
    ),
    components(
        schemas(
            User, Board, StickyNote, Point2D,
            ErrorResponse,
            auth_routes::LoginRequest, auth_routes::RegisterRequest, auth_routes::AuthResponse,
            api::users::UpdateUserRequest,
            api::boards::CreateBoardRequest, api::boards::UpdateBoardRequest,
            api::sticky_notes::CreateStickyNoteRequest, api::sticky_notes::UpdateStickyNoteRequest,
            ListResponse<User>,
            ListResponse<Board>,
            ListResponse<StickyNote>,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "User profile endpoints"),
        (name = "boards", description = "Board management endpoints"),
        (name = "sticky-notes", description = "Sticky note endpoints")
    ),
    info(
        title = "Corkboard API",
        version = "0.1.0",
        description = "API for boards and the sticky notes placed on them",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

/// Declares the `bearer_auth` scheme referenced by protected paths
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> Result<String, serde_json::Error> {
        Self::openapi().to_pretty_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_routes_and_security() {
        let json: serde_json::Value = serde_json::from_str(&ApiDoc::to_json().unwrap()).unwrap();

        assert!(json["paths"]["/v1/auth/login"].is_object());
        assert!(json["paths"]["/v1/boards/{board_id}"]["put"].is_object());
        assert!(json["paths"]["/v1/sticky-notes"]["post"].is_object());
        assert_eq!(
            json["components"]["securitySchemes"]["bearer_auth"]["scheme"],
            "bearer"
        );
    }
}
