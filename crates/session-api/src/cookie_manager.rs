//! Session access through cookies

use axum::http::{
    header::{COOKIE, SET_COOKIE},
    HeaderMap, HeaderValue,
};
use cookie::Cookie;
use session_core::{SessionRef, SessionStore};
use std::sync::Arc;
use tracing::debug;

use crate::error::GatewayError;
use crate::settings::CookieSettings;

/// Max-Age that tells the client to drop the cookie right away.
pub const EXPIRE_NOW: i64 = -1;

/// Binds HTTP cookies to a [`SessionStore`].
#[derive(Clone)]
pub struct CookieManager {
    store: Arc<dyn SessionStore>,
    settings: CookieSettings,
}

impl CookieManager {
    pub fn new(store: Arc<dyn SessionStore>, settings: CookieSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &CookieSettings {
        &self.settings
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Resolve the session named by the request's session cookie.
    pub fn get(&self, headers: &HeaderMap) -> Result<SessionRef, GatewayError> {
        let id = self
            .session_cookie(headers)
            .ok_or_else(|| GatewayError::CookieMissing(self.settings.name.clone()))?;

        Ok(self.store.get(&id)?)
    }

    /// Attach a session cookie to the response and register the session.
    pub fn add(&self, session: &SessionRef, headers: &mut HeaderMap) -> Result<(), GatewayError> {
        let value = self.set_cookie(session.id(), self.settings.max_age_secs)?;
        headers.append(SET_COOKIE, value);
        self.store.add(session.clone());
        debug!("Session cookie issued");
        Ok(())
    }

    /// Expire the client's session cookie and drop the session.
    pub fn remove(&self, session: &SessionRef, headers: &mut HeaderMap) -> Result<(), GatewayError> {
        let value = self.set_cookie("", EXPIRE_NOW)?;
        headers.append(SET_COOKIE, value);
        self.store.remove(session);
        debug!("Session cookie cleared");
        Ok(())
    }

    fn session_cookie(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|h| h.to_str().ok())
            .flat_map(Cookie::split_parse)
            .filter_map(Result::ok)
            .find(|c| c.name() == self.settings.name)
            .map(|c| c.value().to_string())
    }

    fn set_cookie(&self, value: &str, max_age_secs: i64) -> Result<HeaderValue, GatewayError> {
        let mut builder = Cookie::build((self.settings.name.clone(), value.to_string()))
            .path(self.settings.path.clone())
            .max_age(cookie::time::Duration::seconds(max_age_secs))
            .secure(self.settings.secure)
            .http_only(true);

        if let Some(policy) = self.settings.same_site {
            builder = builder.same_site(policy.into());
        }

        HeaderValue::from_str(&builder.build().to_string())
            .map_err(|e| GatewayError::InvalidHeader(e.to_string()))
    }
}
