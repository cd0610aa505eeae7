// Registration and login
// Decision: Uniqueness is checked by reading before writing; no reliance on unique-constraint errors
// Decision: Unknown username and wrong password produce the same InvalidCredentials error

use std::sync::Arc;

use corkboard_core::{CredentialStore, CredentialVerifier, Error, NewCredential, Result, User};

use super::jwt::TokenService;

/// Token type reported to clients
pub const TOKEN_TYPE: &str = "Bearer";

/// Input for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Input for logging in
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Result of a successful registration or login
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: User,
}

pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    verifier: Arc<dyn CredentialVerifier>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        verifier: Arc<dyn CredentialVerifier>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            credentials,
            verifier,
            tokens,
        }
    }

    /// Create a credential and issue a token for it.
    ///
    /// Fails with `UsernameTaken` or `EmailTaken` before anything is written.
    pub async fn register(&self, input: RegisterInput) -> Result<AuthOutcome> {
        let username = input.username.trim().to_string();
        let email = input.email.trim().to_string();

        if self.credentials.exists_by_username(&username).await? {
            return Err(Error::UsernameTaken(username));
        }
        if self.credentials.exists_by_email(&email).await? {
            return Err(Error::EmailTaken(email));
        }

        let password_hash = self.verifier.hash_secret(&input.password)?;
        let credential = self
            .credentials
            .save(NewCredential {
                username,
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = credential.id, "User registered");
        self.outcome(User::from(credential))
    }

    /// Check a username and password and issue a token
    pub async fn login(&self, input: LoginInput) -> Result<AuthOutcome> {
        let username = input.username.trim();

        let credential = match self.credentials.find_by_username(username).await? {
            Some(credential) => credential,
            None => {
                tracing::debug!("Login rejected");
                return Err(Error::InvalidCredentials);
            }
        };

        if !self
            .verifier
            .verify_secret(&input.password, &credential.password_hash)?
        {
            tracing::debug!("Login rejected");
            return Err(Error::InvalidCredentials);
        }

        tracing::info!(user_id = credential.id, "User logged in");
        self.outcome(User::from(credential))
    }

    /// Access token lifetime in seconds
    pub fn access_token_expiration_seconds(&self) -> i64 {
        self.tokens.access_token_expiration_seconds()
    }

    fn outcome(&self, user: User) -> Result<AuthOutcome> {
        let issued = self.tokens.issue(user.id)?;
        Ok(AuthOutcome {
            token: issued.token,
            token_type: TOKEN_TYPE,
            expires_in: self.tokens.access_token_expiration_seconds(),
            user,
        })
    }
}
