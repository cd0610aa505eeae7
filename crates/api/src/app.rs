// Router assembly
// Decision: One function wires stores, services and route states so the binary and the tests build the same app
// Decision: /health is public and never prefixed

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::api;
use crate::auth::{self, AuthService, AuthState, IdentityResolver, TokenService};
use crate::services::{BoardService, StickyNoteService, UserService};
use crate::storage::{Argon2Verifier, StorageBackend};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    storage: &'static str,
}

/// State for health endpoint
#[derive(Clone)]
struct HealthState {
    storage: &'static str,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage,
    })
}

/// Build every API route over one storage backend and token service
pub fn build_api_routes(storage: Arc<StorageBackend>, tokens: Arc<TokenService>) -> Router {
    let verifier = Arc::new(Argon2Verifier);

    let auth_state = AuthState::new(IdentityResolver::new(tokens.clone(), storage.clone()));
    let auth_routes_state = auth::routes::AuthRoutesState {
        service: Arc::new(AuthService::new(
            storage.clone(),
            verifier.clone(),
            tokens,
        )),
    };
    let users_state = api::users::UsersState {
        service: Arc::new(UserService::new(storage.clone(), verifier)),
        auth: auth_state.clone(),
    };
    let boards_state = api::boards::AppState {
        service: Arc::new(BoardService::new(storage.clone())),
        auth: auth_state.clone(),
    };
    let sticky_notes_state = api::sticky_notes::AppState {
        service: Arc::new(StickyNoteService::new(storage.clone(), storage)),
        auth: auth_state,
    };

    Router::new()
        .merge(auth::routes::routes(auth_routes_state))
        .merge(api::users::routes(users_state))
        .merge(api::boards::routes(boards_state))
        .merge(api::sticky_notes::routes(sticky_notes_state))
}

/// Build the full application router: health plus (optionally prefixed) API routes
pub fn build_router(
    storage: Arc<StorageBackend>,
    tokens: Arc<TokenService>,
    api_prefix: &str,
) -> Router {
    let health_state = HealthState {
        storage: if storage.is_dev_mode() {
            "memory"
        } else {
            "postgres"
        },
    };
    let api_routes = build_api_routes(storage, tokens);

    Router::new()
        .route("/health", get(health).with_state(health_state))
        .merge(build_router_with_prefix(api_routes, api_prefix))
}

/// Nest routes under an optional API prefix
pub fn build_router_with_prefix<S: Clone + Send + Sync + 'static>(
    api_routes: Router<S>,
    api_prefix: &str,
) -> Router<S> {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_routes() -> Router {
        Router::new().route("/v1/test", get(|| async { "ok" }))
    }

    fn test_tokens() -> Arc<TokenService> {
        Arc::new(
            TokenService::new(&JwtConfig {
                secret: "router-test-secret-0123456789abcdef".to_string(),
                ..Default::default()
            })
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_api_prefix_empty() {
        let app = build_router_with_prefix(test_routes(), "");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_api_prefix_set() {
        let app = build_router_with_prefix(test_routes(), "/api");

        // Route should work with prefix
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 200);

        // Route should NOT work without prefix
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_health_is_not_prefixed() {
        let app = build_router(Arc::new(StorageBackend::in_memory()), test_tokens(), "/api");

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["storage"], "memory");
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let app = build_router(Arc::new(StorageBackend::in_memory()), test_tokens(), "");

        let response = app
            .oneshot(Request::builder().uri("/v1/boards").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 401);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Authentication required");
    }
}
