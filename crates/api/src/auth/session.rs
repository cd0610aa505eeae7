// Per-request session context and its extractors
// Decision: The context is built fresh for every request; nothing is stored between requests
// Decision: Missing or malformed Authorization header yields an anonymous context without touching the resolver
// Decision: A bearer token that fails to resolve rejects the request outright

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use corkboard_core::{Error, Principal, Result};

use super::guard;
use super::identity::IdentityResolver;
use crate::api::common::ApiError;

/// The principal bound to one request, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionContext {
    principal: Option<Principal>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self { principal: None }
    }

    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    /// The bound principal, or `Unauthenticated` for anonymous requests
    pub fn current_principal(&self) -> Result<Principal> {
        self.principal.ok_or(Error::Unauthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }
}

/// Auth state shared across routes
#[derive(Clone)]
pub struct AuthState {
    pub resolver: IdentityResolver,
}

impl AuthState {
    pub fn new(resolver: IdentityResolver) -> Self {
        Self { resolver }
    }

    /// Build the session context for a request from its headers
    pub async fn establish(&self, headers: &HeaderMap) -> Result<SessionContext> {
        match bearer_token(headers) {
            Some(token) => {
                let principal = self.resolver.resolve(token).await?;
                Ok(SessionContext::authenticated(principal))
            }
            None => Ok(SessionContext::anonymous()),
        }
    }
}

/// Extract the bearer token from the Authorization header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Extractor for the session context.
/// Anonymous requests pass; requests carrying a bad token are rejected.
#[axum::async_trait]
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        auth_state
            .establish(&parts.headers)
            .await
            .map_err(ApiError::from)
    }
}

/// Extractor for an authenticated principal.
/// Returns 401 if no principal is bound to the request.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Principal);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let context = SessionContext::from_request_parts(parts, state).await?;
        let principal = guard::require_authenticated(&context)?;
        Ok(AuthUser(principal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::config::JwtConfig;
    use crate::auth::jwt::TokenService;
    use crate::storage::StorageBackend;
    use axum::http::HeaderValue;
    use corkboard_core::{CredentialStore, NewCredential};
    use std::sync::Arc;

    fn headers_with(value: &[u8]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(value).unwrap(),
        );
        headers
    }

    async fn test_state() -> (AuthState, Arc<TokenService>, i64) {
        let tokens = Arc::new(
            TokenService::new(&JwtConfig {
                secret: "session-test-secret-0123456789abcdef".to_string(),
                ..Default::default()
            })
            .unwrap(),
        );
        let db = Arc::new(StorageBackend::in_memory());
        let user = db
            .save(NewCredential {
                username: "carol".to_string(),
                email: "carol@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        let state = AuthState::new(IdentityResolver::new(tokens.clone(), db));
        (state, tokens, user.id)
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers_with(b"Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(&headers_with(b"Bearer ")), None);
        assert_eq!(bearer_token(&headers_with(b"Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers_with(b"bearer abc")), None);
        assert_eq!(bearer_token(&headers_with(b"Bearer \xff\xfe")), None);
    }

    #[test]
    fn test_anonymous_context_has_no_principal() {
        let context = SessionContext::anonymous();
        assert!(!context.is_authenticated());
        assert!(matches!(
            context.current_principal(),
            Err(Error::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_establish_without_header_is_anonymous() {
        let (state, _, _) = test_state().await;
        let context = state.establish(&HeaderMap::new()).await.unwrap();
        assert!(!context.is_authenticated());

        let context = state.establish(&headers_with(b"Token xyz")).await.unwrap();
        assert!(!context.is_authenticated());
    }

    #[tokio::test]
    async fn test_establish_with_valid_token() {
        let (state, tokens, user_id) = test_state().await;
        let issued = tokens.issue(user_id).unwrap();
        let header = format!("Bearer {}", issued.token);

        let context = state.establish(&headers_with(header.as_bytes())).await.unwrap();
        assert_eq!(context.current_principal().unwrap().user_id, user_id);
    }

    #[tokio::test]
    async fn test_establish_with_bad_token_fails() {
        let (state, _, _) = test_state().await;
        let result = state.establish(&headers_with(b"Bearer garbage")).await;
        assert!(matches!(result, Err(Error::TokenInvalid)));
    }

    #[tokio::test]
    async fn test_contexts_are_isolated_per_request() {
        let (state, tokens, user_id) = test_state().await;
        let issued = tokens.issue(user_id).unwrap();
        let authed_headers = headers_with(format!("Bearer {}", issued.token).as_bytes());
        let anon_headers = HeaderMap::new();

        let authed = state.establish(&authed_headers);
        let anon = state.establish(&anon_headers);
        let (authed, anon) = tokio::join!(authed, anon);

        assert!(authed.unwrap().is_authenticated());
        assert!(!anon.unwrap().is_authenticated());
    }
}
