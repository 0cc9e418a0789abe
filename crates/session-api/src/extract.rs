//! Axum extractor for the session bound to a request

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use session_core::SessionRef;
use std::ops::Deref;
use std::sync::Arc;

use crate::cookie_manager::CookieManager;
use crate::error::GatewayError;

/// The session named by the request's session cookie.
///
/// Rejects with [`GatewayError`] (401) when the cookie is missing or the
/// session is unknown. Extraction counts as an access.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub SessionRef);

impl Deref for CurrentSession {
    type Target = SessionRef;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CurrentSession
where
    Arc<CookieManager>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let manager = Arc::<CookieManager>::from_ref(state);
        manager.get(&parts.headers).map(CurrentSession)
    }
}
