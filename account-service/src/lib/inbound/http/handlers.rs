use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::TokenPair;

pub mod authenticate;
pub mod refresh_token;
pub mod register;

/// Token pair body shared by all three endpoints.
///
/// The capitalized field names are part of the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticationResponse {
    #[serde(rename = "Access token")]
    pub access_token: String,
    #[serde(rename = "Refresh token")]
    pub refresh_token: String,
}

impl From<TokenPair> for AuthenticationResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

/// HTTP error boundary.
///
/// Classifies only the enumerated error kinds; everything else falls
/// through to a blunt 500 naming the endpoint and the failure text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Internal {
        endpoint: &'static str,
        message: String,
    },
}

impl ApiError {
    pub fn classify(endpoint: &'static str, err: AuthError) -> Self {
        match err {
            AuthError::Validation(e) => ApiError::BadRequest(e.to_string()),
            // Uniqueness is a registration constraint like any other
            e @ (AuthError::UsernameAlreadyExists(_) | AuthError::EmailAlreadyExists(_)) => {
                ApiError::BadRequest(e.to_string())
            }
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized(AuthError::InvalidCredentials.to_string())
            }
            e => ApiError::Internal {
                endpoint,
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { message })).into_response()
            }
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, Json(ErrorBody { message })).into_response()
            }
            ApiError::Internal { endpoint, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error occurred in endpoint: {}. Message: {}", endpoint, message),
            )
                .into_response(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_pair_wire_names() {
        let body = AuthenticationResponse::from(TokenPair {
            access_token: "aaa".to_string(),
            refresh_token: "rrr".to_string(),
        });

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["Access token"], "aaa");
        assert_eq!(json["Refresh token"], "rrr");
    }

    #[test]
    fn test_classify_enumerated_kinds() {
        assert_eq!(
            ApiError::classify("auth.authenticate", AuthError::InvalidCredentials),
            ApiError::Unauthorized("Invalid credentials".to_string())
        );
        assert!(matches!(
            ApiError::classify(
                "auth.register",
                AuthError::EmailAlreadyExists("a@b.com".to_string())
            ),
            ApiError::BadRequest(_)
        ));
    }

    #[test]
    fn test_classify_falls_back_to_internal() {
        let err = ApiError::classify(
            "auth.refresh_token",
            AuthError::UserNotFound("alice1".to_string()),
        );
        assert_eq!(
            err,
            ApiError::Internal {
                endpoint: "auth.refresh_token",
                message: "User not found: alice1".to_string(),
            }
        );
    }
}
