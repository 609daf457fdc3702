use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::Token;
use crate::domain::auth::models::TokenPair;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for the authentication orchestration operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user and issue an access/refresh token pair.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` / `EmailAlreadyExists` - Uniqueness violated
    /// * `Password` - Hashing failed
    /// * `Token` - Token issuance failed
    /// * `Database` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<TokenPair, AuthError>;

    /// Verify an email/password pair and issue a fresh token pair,
    /// revoking every previously-valid token for the user.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `UserNotFound` - User vanished after credential verification
    /// * `Database` - Store operation failed
    async fn authenticate(&self, email: &str, password: &str) -> Result<TokenPair, AuthError>;

    /// Exchange a refresh token carried in an Authorization header for a new
    /// access token. Returns `None` without side effects when the header is
    /// absent, lacks the bearer prefix, or carries an unusable token.
    ///
    /// # Errors
    /// * `UserNotFound` - Token subject no longer resolves to a user
    /// * `Database` - Store operation failed
    async fn refresh_token(
        &self,
        authorization: Option<&str>,
    ) -> Result<Option<TokenPair>, AuthError>;
}

/// Persistence port for user records.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve a user by username (None if absent).
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError>;

    /// Retrieve a user by email address (None if absent).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Persist a new user, returning it with its generated identifier.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Database` - Store operation failed
    async fn save(&self, user: NewUser) -> Result<User, AuthError>;
}

/// Persistence port for issued tokens.
#[async_trait]
pub trait TokenStore: Send + Sync + 'static {
    /// All tokens for the user that are not yet both revoked and expired.
    async fn find_all_valid_by_user(&self, user_id: UserId) -> Result<Vec<Token>, AuthError>;

    /// Persist a freshly issued bearer token (revoked=false, expired=false).
    async fn save(&self, user_id: UserId, token: &str) -> Result<Token, AuthError>;

    /// Persist flag mutations on existing token rows.
    async fn save_all(&self, tokens: Vec<Token>) -> Result<(), AuthError>;
}
