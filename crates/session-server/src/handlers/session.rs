//! Handlers for the current session

use axum::{extract::Path, Json};
use serde::Serialize;
use session_api::{CurrentSession, GatewayError};
use session_core::{AttributeValue, SessionExt};

use super::{SessionDto, RESERVED_ATTRIBUTES, VISITS_ATTRIBUTE};
use crate::error::ApiError;
use crate::response::ApiResponse;

#[derive(Debug, Serialize)]
pub struct AttributeDto {
    pub name: String,
    pub value: AttributeValue,
}

/// GET /api/v1/session
pub async fn show(
    current: Result<CurrentSession, GatewayError>,
) -> Result<Json<ApiResponse<SessionDto>>, ApiError> {
    let CurrentSession(session) = current?;
    // not atomic: concurrent requests on one session may lose a count
    let visits: u64 = session.attribute_as(VISITS_ATTRIBUTE)?.unwrap_or(0);
    session.set_attribute_as(VISITS_ATTRIBUTE, &(visits + 1))?;

    Ok(Json(ApiResponse::success(SessionDto::from(&session))))
}

/// PUT /api/v1/session/attributes/{name}
pub async fn set_attribute(
    current: Result<CurrentSession, GatewayError>,
    Path(name): Path<String>,
    Json(value): Json<AttributeValue>,
) -> Result<Json<ApiResponse<AttributeDto>>, ApiError> {
    let CurrentSession(session) = current?;
    if name.trim().is_empty() {
        return Err(ApiError::BadRequest("Attribute name is required".to_string()));
    }
    if RESERVED_ATTRIBUTES.contains(&name.as_str()) {
        return Err(ApiError::BadRequest(format!("Attribute {} is read-only", name)));
    }

    session.set_attribute(&name, value.clone());
    Ok(Json(ApiResponse::success(AttributeDto { name, value })))
}

/// GET /api/v1/session/attributes/{name}
pub async fn get_attribute(
    current: Result<CurrentSession, GatewayError>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<AttributeDto>>, ApiError> {
    let CurrentSession(session) = current?;
    let value = session
        .attribute(&name)
        .ok_or_else(|| ApiError::NotFound(format!("Attribute {} is not set", name)))?;

    Ok(Json(ApiResponse::success(AttributeDto { name, value })))
}
