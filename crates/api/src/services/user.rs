// User service
// Decision: Profile changes and account deletion are self-service only
// Decision: A new password is hashed here; hashes never cross the API boundary

use corkboard_core::{
    CredentialStore, CredentialUpdate, CredentialVerifier, Error, Principal, Result, User, UserId,
};
use std::sync::Arc;

use crate::api::users::UpdateUserRequest;
use crate::auth::guard::require_owner;

pub struct UserService {
    credentials: Arc<dyn CredentialStore>,
    verifier: Arc<dyn CredentialVerifier>,
}

impl UserService {
    pub fn new(credentials: Arc<dyn CredentialStore>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            credentials,
            verifier,
        }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let credentials = self.credentials.list().await?;
        Ok(credentials.into_iter().map(User::from).collect())
    }

    pub async fn get(&self, id: UserId) -> Result<User> {
        self.credentials
            .find_by_id(id)
            .await?
            .map(User::from)
            .ok_or_else(|| Error::not_found("User", id))
    }

    pub async fn get_by_username(&self, username: &str) -> Result<User> {
        self.credentials
            .find_by_username(username)
            .await?
            .map(User::from)
            .ok_or_else(|| Error::not_found("User", username))
    }

    /// The user behind the acting principal
    pub async fn me(&self, principal: &Principal) -> Result<User> {
        self.get(principal.user_id).await
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: UserId,
        req: UpdateUserRequest,
    ) -> Result<User> {
        require_owner(id, principal)?;
        let current = self.get(id).await?;

        let username = req.username.map(|u| u.trim().to_string());
        let email = req.email.map(|e| e.trim().to_string());

        if let Some(username) = username.as_deref().filter(|u| *u != current.username) {
            if self.credentials.exists_by_username(username).await? {
                return Err(Error::UsernameTaken(username.to_string()));
            }
        }
        if let Some(email) = email.as_deref().filter(|e| *e != current.email) {
            if self.credentials.exists_by_email(email).await? {
                return Err(Error::EmailTaken(email.to_string()));
            }
        }

        let password_hash = req
            .password
            .map(|p| self.verifier.hash_secret(&p))
            .transpose()?;

        let credential = self
            .credentials
            .update(
                id,
                CredentialUpdate {
                    username,
                    email,
                    password_hash,
                },
            )
            .await?
            .ok_or_else(|| Error::not_found("User", id))?;

        tracing::info!(user_id = id, "User updated");
        Ok(User::from(credential))
    }

    /// Delete the account along with its boards and notes
    pub async fn delete(&self, principal: &Principal, id: UserId) -> Result<()> {
        require_owner(id, principal)?;

        if !self.credentials.delete(id).await? {
            return Err(Error::not_found("User", id));
        }
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}
