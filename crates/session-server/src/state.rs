use axum::extract::FromRef;
use session_api::CookieManager;
use session_core::{MemoryStore, SessionConfig, SessionError};
use std::sync::Arc;

use crate::config::Settings;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub cookies: Arc<CookieManager>,
    pub session: SessionConfig,
}

impl AppState {
    /// Build the store and cookie manager. Must run inside a tokio runtime.
    pub fn new(settings: &Settings) -> Result<Self, SessionError> {
        let store = Arc::new(MemoryStore::new(settings.session.sweep_interval())?);
        let cookies = Arc::new(CookieManager::new(store.clone(), settings.cookie.clone()));

        Ok(Self {
            store,
            cookies,
            session: settings.session.clone(),
        })
    }
}

impl FromRef<AppState> for Arc<CookieManager> {
    fn from_ref(state: &AppState) -> Self {
        state.cookies.clone()
    }
}
