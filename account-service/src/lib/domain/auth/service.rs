use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenCodec;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::CredentialStore;
use crate::domain::auth::ports::TokenStore;
use crate::domain::user::models::User;

const BEARER_PREFIX: &str = "Bearer ";

/// Authentication orchestrator.
///
/// Coordinates the credential store, the token store, and the token codec
/// across the register, authenticate, and refresh flows. Holds no mutable
/// state of its own; all side effects go through the injected stores.
///
/// Concurrent flows for the same user are not serialized here: two logins
/// racing through revoke-then-insert can each leave a live token. The
/// stores own whatever synchronization discipline exists.
pub struct AuthService<CS, TS>
where
    CS: CredentialStore,
    TS: TokenStore,
{
    credentials: Arc<CS>,
    tokens: Arc<TS>,
    codec: Arc<TokenCodec>,
    password_hasher: PasswordHasher,
}

impl<CS, TS> AuthService<CS, TS>
where
    CS: CredentialStore,
    TS: TokenStore,
{
    pub fn new(credentials: Arc<CS>, tokens: Arc<TS>, codec: Arc<TokenCodec>) -> Self {
        Self {
            credentials,
            tokens,
            codec,
            password_hasher: PasswordHasher::new(),
        }
    }

    fn issue_access_token(&self, user: &User) -> Result<String, AuthError> {
        self.codec
            .issue_access_token(user.username.as_str(), user.id.0)
            .map_err(|e| AuthError::Token(e.to_string()))
    }

    fn issue_refresh_token(&self, user: &User) -> Result<String, AuthError> {
        self.codec
            .issue_refresh_token(user.username.as_str(), user.id.0)
            .map_err(|e| AuthError::Token(e.to_string()))
    }

    /// Flag every still-valid token of the user as revoked and expired.
    async fn revoke_all_user_tokens(&self, user: &User) -> Result<(), AuthError> {
        let mut valid_tokens = self.tokens.find_all_valid_by_user(user.id).await?;
        if valid_tokens.is_empty() {
            return Ok(());
        }

        for token in &mut valid_tokens {
            token.revoked = true;
            token.expired = true;
        }

        self.tokens.save_all(valid_tokens).await
    }
}

#[async_trait]
impl<CS, TS> AuthServicePort for AuthService<CS, TS>
where
    CS: CredentialStore,
    TS: TokenStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<TokenPair, AuthError> {
        let password_hash = self
            .password_hasher
            .hash(command.password.as_str())
            .map_err(|e| AuthError::Password(e.to_string()))?;

        let user = self
            .credentials
            .save(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
                role: command.role,
            })
            .await?;

        let access_token = self.issue_access_token(&user)?;
        let refresh_token = self.issue_refresh_token(&user)?;

        // Only the access token is tracked in the store
        self.tokens.save(user.id, &access_token).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        // Credential verification. An unknown email and a wrong password are
        // indistinguishable to the caller.
        let candidate = self.credentials.find_by_email(email).await?;
        let verified = match &candidate {
            Some(user) => self
                .password_hasher
                .verify(password, &user.password_hash)
                .map_err(|e| AuthError::Password(e.to_string()))?,
            None => false,
        };
        if !verified {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .credentials
            .find_by_email(email)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(email.to_string()))?;

        let access_token = self.issue_access_token(&user)?;
        let refresh_token = self.issue_refresh_token(&user)?;

        self.revoke_all_user_tokens(&user).await?;
        self.tokens.save(user.id, &access_token).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User authenticated");

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn refresh_token(
        &self,
        authorization: Option<&str>,
    ) -> Result<Option<TokenPair>, AuthError> {
        let Some(header) = authorization else {
            return Ok(None);
        };
        let Some(refresh_token) = header.strip_prefix(BEARER_PREFIX) else {
            return Ok(None);
        };

        let subject = match self.codec.extract_subject(refresh_token) {
            Ok(subject) => subject,
            Err(e) => {
                tracing::debug!(error = %e, "Refresh token rejected");
                return Ok(None);
            }
        };

        let user = self
            .credentials
            .find_by_username(&subject)
            .await?
            .ok_or(AuthError::UserNotFound(subject))?;

        if !self.codec.is_valid(refresh_token, user.username.as_str()) {
            return Ok(None);
        }

        // New access token only; the refresh token is echoed back unrotated
        let access_token = self.issue_access_token(&user)?;

        self.revoke_all_user_tokens(&user).await?;
        self.tokens.save(user.id, &access_token).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "Access token refreshed");

        Ok(Some(TokenPair {
            access_token,
            refresh_token: refresh_token.to_string(),
        }))
    }
}
