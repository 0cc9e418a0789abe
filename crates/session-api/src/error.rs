use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use session_core::SessionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Cookie {0} was not in request")]
    CookieMissing(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Invalid cookie header: {0}")]
    InvalidHeader(String),
}

impl GatewayError {
    /// True when the request carries no usable session.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            GatewayError::CookieMissing(_) | GatewayError::Session(SessionError::NotFound(_))
        )
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_unauthenticated() {
            StatusCode::UNAUTHORIZED
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Machine-readable error code for response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::CookieMissing(_) | GatewayError::Session(SessionError::NotFound(_)) => {
                "UNAUTHORIZED"
            }
            GatewayError::Session(_) => "SESSION_ERROR",
            GatewayError::InvalidHeader(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to return to the client. Never contains the session id.
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::CookieMissing(_) => "Session cookie missing".to_string(),
            GatewayError::Session(SessionError::NotFound(_)) => "Session not found".to_string(),
            GatewayError::Session(e) => e.to_string(),
            GatewayError::InvalidHeader(msg) => msg.clone(),
        }
    }

    /// Log at a level matching the status.
    pub fn log(&self) {
        match self {
            GatewayError::CookieMissing(name) => {
                tracing::warn!("Request without session cookie {}", name)
            }
            GatewayError::Session(SessionError::NotFound(_)) => {
                tracing::warn!("Request with unknown or expired session")
            }
            GatewayError::Session(e) => tracing::error!("Session error: {}", e),
            GatewayError::InvalidHeader(msg) => tracing::error!("Invalid cookie header: {}", msg),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        self.log();
        let body = Json(ErrorResponse {
            error: self.code(),
            message: self.public_message(),
        });

        (self.status_code(), body).into_response()
    }
}
