// Identity resolution: bearer token -> Principal
// Decision: Strict resolution; the token subject must still exist in the credential store
// Decision: Store failures stay StoreUnavailable so they are never reported as bad tokens

use std::sync::Arc;

use corkboard_core::{CredentialStore, Error, Principal, Result};

use super::jwt::TokenService;

/// Turns a raw bearer token into the principal it names
#[derive(Clone)]
pub struct IdentityResolver {
    tokens: Arc<TokenService>,
    credentials: Arc<dyn CredentialStore>,
}

impl IdentityResolver {
    pub fn new(tokens: Arc<TokenService>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            tokens,
            credentials,
        }
    }

    /// Verify the token and confirm its subject is a known user.
    ///
    /// Errors: `TokenInvalid`, `TokenExpired`, `StoreUnavailable`.
    pub async fn resolve(&self, token: &str) -> Result<Principal> {
        let user_id = self.tokens.verify(token)?;

        match self.credentials.find_by_id(user_id).await? {
            Some(credential) => Ok(Principal::new(credential.id)),
            None => {
                tracing::debug!(user_id, "Token subject no longer exists");
                Err(Error::TokenInvalid)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::config::JwtConfig;
    use crate::storage::StorageBackend;
    use async_trait::async_trait;
    use corkboard_core::{Credential, CredentialUpdate, NewCredential, UserId};
    use std::time::Duration;

    fn token_service(secret: &str) -> Arc<TokenService> {
        Arc::new(
            TokenService::new(&JwtConfig {
                secret: secret.to_string(),
                access_token_lifetime: Duration::from_secs(3600),
            })
            .unwrap(),
        )
    }

    async fn seeded_store() -> (Arc<StorageBackend>, UserId) {
        let db = Arc::new(StorageBackend::in_memory());
        let credential = db
            .save(NewCredential {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        (db, credential.id)
    }

    /// Store that is always down
    struct UnavailableStore;

    #[async_trait]
    impl CredentialStore for UnavailableStore {
        async fn find_by_username(&self, _username: &str) -> Result<Option<Credential>> {
            Err(Error::store_unavailable("connection refused"))
        }
        async fn find_by_id(&self, _id: UserId) -> Result<Option<Credential>> {
            Err(Error::store_unavailable("connection refused"))
        }
        async fn exists_by_email(&self, _email: &str) -> Result<bool> {
            Err(Error::store_unavailable("connection refused"))
        }
        async fn save(&self, _input: NewCredential) -> Result<Credential> {
            Err(Error::store_unavailable("connection refused"))
        }
        async fn update(&self, _id: UserId, _input: CredentialUpdate) -> Result<Option<Credential>> {
            Err(Error::store_unavailable("connection refused"))
        }
        async fn delete(&self, _id: UserId) -> Result<bool> {
            Err(Error::store_unavailable("connection refused"))
        }
        async fn list(&self) -> Result<Vec<Credential>> {
            Err(Error::store_unavailable("connection refused"))
        }
    }

    const SECRET: &str = "resolver-test-secret-0123456789abcdef";

    #[tokio::test]
    async fn test_resolves_known_user() {
        let tokens = token_service(SECRET);
        let (db, user_id) = seeded_store().await;
        let resolver = IdentityResolver::new(tokens.clone(), db);

        let issued = tokens.issue(user_id).unwrap();
        let principal = resolver.resolve(&issued.token).await.unwrap();
        assert_eq!(principal, Principal::new(user_id));
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent() {
        let tokens = token_service(SECRET);
        let (db, user_id) = seeded_store().await;
        let resolver = IdentityResolver::new(tokens.clone(), db);

        let issued = tokens.issue(user_id).unwrap();
        let first = resolver.resolve(&issued.token).await.unwrap();
        let second = resolver.resolve(&issued.token).await.unwrap();
        assert_eq!(first.user_id, second.user_id);
    }

    #[tokio::test]
    async fn test_unknown_subject_is_invalid() {
        let tokens = token_service(SECRET);
        let (db, _) = seeded_store().await;
        let resolver = IdentityResolver::new(tokens.clone(), db);

        let issued = tokens.issue(9_999).unwrap();
        assert!(matches!(
            resolver.resolve(&issued.token).await,
            Err(Error::TokenInvalid)
        ));
    }

    #[tokio::test]
    async fn test_deleted_user_token_is_invalid() {
        let tokens = token_service(SECRET);
        let (db, user_id) = seeded_store().await;
        let resolver = IdentityResolver::new(tokens.clone(), db.clone());

        let issued = tokens.issue(user_id).unwrap();
        assert!(db.delete(user_id).await.unwrap());
        assert!(matches!(
            resolver.resolve(&issued.token).await,
            Err(Error::TokenInvalid)
        ));
    }

    #[tokio::test]
    async fn test_expired_token_passes_through() {
        let tokens = token_service(SECRET);
        let (db, user_id) = seeded_store().await;
        let resolver = IdentityResolver::new(tokens.clone(), db);

        let issued = tokens
            .issue_at(user_id, chrono::Utc::now() - chrono::Duration::hours(2))
            .unwrap();
        assert!(matches!(
            resolver.resolve(&issued.token).await,
            Err(Error::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn test_foreign_token_is_invalid() {
        let (db, user_id) = seeded_store().await;
        let resolver = IdentityResolver::new(token_service(SECRET), db);
        let foreign = token_service("some-other-secret-0123456789abcdefgh")
            .issue(user_id)
            .unwrap();

        assert!(matches!(
            resolver.resolve(&foreign.token).await,
            Err(Error::TokenInvalid)
        ));
    }

    #[tokio::test]
    async fn test_store_failure_is_not_an_auth_failure() {
        let tokens = token_service(SECRET);
        let resolver = IdentityResolver::new(tokens.clone(), Arc::new(UnavailableStore));

        let issued = tokens.issue(1).unwrap();
        let err = resolver.resolve(&issued.token).await.unwrap_err();
        assert!(matches!(err, Error::StoreUnavailable(_)));
        assert!(!err.is_authentication_failure());
    }

    #[tokio::test]
    async fn test_garbage_token_skips_store() {
        // UnavailableStore would turn any lookup into StoreUnavailable
        let resolver = IdentityResolver::new(token_service(SECRET), Arc::new(UnavailableStore));
        assert!(matches!(
            resolver.resolve("not.a.jwt").await,
            Err(Error::TokenInvalid)
        ));
    }
}
