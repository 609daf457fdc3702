use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::refresh_token::refresh_token;
use super::handlers::register::register;
use crate::domain::auth::ports::CredentialStore;
use crate::domain::auth::ports::TokenStore;
use crate::domain::auth::service::AuthService;

/// Shared handler state, generic over the two store implementations so the
/// test harness can substitute in-memory fakes for Postgres.
pub struct AppState<CS, TS>
where
    CS: CredentialStore,
    TS: TokenStore,
{
    pub auth_service: Arc<AuthService<CS, TS>>,
}

impl<CS, TS> Clone for AppState<CS, TS>
where
    CS: CredentialStore,
    TS: TokenStore,
{
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
        }
    }
}

pub fn create_router<CS, TS>(auth_service: Arc<AuthService<CS, TS>>) -> Router
where
    CS: CredentialStore,
    TS: TokenStore,
{
    let state = AppState { auth_service };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/api/v1/auth/register", post(register::<CS, TS>))
        .route("/api/v1/auth/authenticate", post(authenticate::<CS, TS>))
        .route("/api/v1/auth/refresh-token", post(refresh_token::<CS, TS>))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
