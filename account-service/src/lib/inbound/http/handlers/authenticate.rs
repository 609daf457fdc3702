use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::AuthenticationResponse;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::CredentialStore;
use crate::domain::auth::ports::TokenStore;
use crate::inbound::http::router::AppState;

pub async fn authenticate<CS: CredentialStore, TS: TokenStore>(
    State(state): State<AppState<CS, TS>>,
    Json(body): Json<AuthenticateRequest>,
) -> Result<Json<AuthenticationResponse>, ApiError> {
    state
        .auth_service
        .authenticate(&body.email, &body.password)
        .await
        .map(|pair| Json(pair.into()))
        .map_err(|e| ApiError::classify("auth.authenticate", e))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequest {
    email: String,
    password: String,
}
