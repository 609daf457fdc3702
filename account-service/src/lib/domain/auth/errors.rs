use thiserror::Error;

use crate::domain::user::errors::ValidationError;

/// Top-level error for authentication operations.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Deliberately generic: does not reveal whether the email exists.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    /// The user vanished between authentication steps. An internal
    /// invariant violation, surfaced through the catch-all boundary.
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Password error: {0}")]
    Password(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(String),
}
