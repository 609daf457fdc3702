use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::AuthenticationResponse;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::CredentialStore;
use crate::domain::auth::ports::TokenStore;
use crate::domain::user::errors::ValidationError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::Role;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;

pub async fn register<CS: CredentialStore, TS: TokenStore>(
    State(state): State<AppState<CS, TS>>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<AuthenticationResponse>, ApiError> {
    let command = body
        .try_into_command()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .auth_service
        .register(command)
        .await
        .map(|pair| Json(pair.into()))
        .map_err(|e| ApiError::classify("auth.register", e))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
    role: String,
}

impl RegisterRequest {
    /// Validate every field, reporting all violated constraints at once.
    fn try_into_command(self) -> Result<RegisterCommand, ValidationError> {
        let mut violations = Vec::new();

        let username = Username::new(self.username)
            .map_err(|e| violations.push(e.to_string()))
            .ok();
        let email = EmailAddress::new(self.email)
            .map_err(|e| violations.push(e.to_string()))
            .ok();
        let password = Password::new(self.password)
            .map_err(|e| violations.push(e.to_string()))
            .ok();
        let role = self
            .role
            .parse::<Role>()
            .map_err(|e| violations.push(e.to_string()))
            .ok();

        match (username, email, password, role) {
            (Some(username), Some(email), Some(password), Some(role)) => {
                Ok(RegisterCommand::new(username, email, password, role))
            }
            _ => Err(ValidationError { violations }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str, role: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_valid_request_parses() {
        let command = request("alice1", "alice1@example.com", "password123", "USER")
            .try_into_command()
            .unwrap();
        assert_eq!(command.username.as_str(), "alice1");
        assert_eq!(command.role, Role::User);
    }

    #[test]
    fn test_every_violation_is_reported() {
        let err = request("ab", "x", "short", "SUPERUSER")
            .try_into_command()
            .unwrap_err();

        assert_eq!(err.violations.len(), 4);
        let rendered = err.to_string();
        assert!(rendered.contains("Username too short"));
        assert!(rendered.contains("Email address"));
        assert!(rendered.contains("Password length"));
        assert!(rendered.contains("Unknown role"));
    }

    #[test]
    fn test_five_character_username_passes() {
        assert!(request("abcde", "alice1@example.com", "password123", "USER")
            .try_into_command()
            .is_ok());
        assert!(request("abcd", "alice1@example.com", "password123", "USER")
            .try_into_command()
            .is_err());
    }
}
