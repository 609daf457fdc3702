use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use super::ApiError;
use super::AuthenticationResponse;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::CredentialStore;
use crate::domain::auth::ports::TokenStore;
use crate::inbound::http::router::AppState;

/// Exchanges the refresh token in the Authorization header for a new access
/// token. Writes the token pair to the body, or nothing when the flow no-ops.
pub async fn refresh_token<CS: CredentialStore, TS: TokenStore>(
    State(state): State<AppState<CS, TS>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    // Header values that are not valid UTF-8 are treated as absent
    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());

    let refreshed = state
        .auth_service
        .refresh_token(authorization)
        .await
        .map_err(|e| ApiError::classify("auth.refresh_token", e))?;

    Ok(match refreshed {
        Some(pair) => Json(AuthenticationResponse::from(pair)).into_response(),
        None => StatusCode::OK.into_response(),
    })
}
