//! Login / logout handlers

use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;
use session_api::{CurrentSession, GatewayError};
use session_core::{MemorySession, SessionExt};
use tracing::info;

use super::{SessionDto, USERNAME_ATTRIBUTE};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
}

/// Login handler - POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<ApiResponse<SessionDto>>), ApiError> {
    let username = payload.username.trim();
    if username.is_empty() {
        return Err(ApiError::BadRequest("Username is required".to_string()));
    }

    let session = MemorySession::new_at(
        state.session.id_length,
        state.session.idle_timeout(),
        state.store.clock().as_ref(),
    )?
    .into_ref();
    session.set_attribute_as(USERNAME_ATTRIBUTE, username)?;

    let mut headers = HeaderMap::new();
    state.cookies.add(&session, &mut headers)?;

    info!("Session started for {}", username);
    Ok((headers, Json(ApiResponse::success(SessionDto::from(&session)))))
}

/// Logout handler - POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    current: Result<CurrentSession, GatewayError>,
) -> Result<(HeaderMap, Json<ApiResponse<()>>), ApiError> {
    let CurrentSession(session) = current?;
    let mut headers = HeaderMap::new();
    state.cookies.remove(&session, &mut headers)?;

    info!("Session ended");
    Ok((headers, Json(ApiResponse::success(()))))
}
