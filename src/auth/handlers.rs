/**
 * Auth Handlers
 *
 * HTTP handlers for the public authentication endpoints:
 *
 * - `POST /auth/signup` - register an employee account, returns a token
 * - `POST /auth/signin` - verify credentials, returns a refresh token
 * - `POST /auth/refresh` - reissue an access token for a session
 *
 * # Errors
 *
 * - `404 Not Found` - unknown username on signin/refresh
 * - `401 Unauthorized` - password mismatch on an open account
 * - `423 Locked` - account locked (already, or by this attempt)
 * - `409 Conflict` - signup collision on username or email
 * - `400 Bad Request` - payload validation failure
 */

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::auth::service::{self, SignInRequest};
use crate::employees::types::EmployeeCreateEdit;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Token envelope returned by every auth endpoint.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// `POST /auth/signup`
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<EmployeeCreateEdit>,
) -> Result<Json<TokenResponse>, ApiError> {
    tracing::info!("Signup request for username: {}", request.username);
    let token = service::sign_up(&state.db, &state.tokens, request).await?;
    Ok(Json(TokenResponse { token }))
}

/// `POST /auth/signin`
pub async fn signin(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    tracing::info!("Sign-in request for username: {}", request.username);
    let token = service::sign_in(&state.db, &state.tokens, request).await?;
    Ok(Json(TokenResponse { token }))
}

/// `POST /auth/refresh`
///
/// Reissues an access token from the username alone; the password field
/// in the payload is accepted but not re-verified (silent re-issuance
/// for an already-authenticated session).
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    tracing::info!("Token refresh request for username: {}", request.username);
    let token = service::refresh(&state.db, &state.tokens, request).await?;
    Ok(Json(TokenResponse { token }))
}
