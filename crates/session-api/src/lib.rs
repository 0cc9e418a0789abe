//! # Session API
//!
//! Cookie transport for sessions: the cookie manager, its settings, and the
//! axum extractor handlers use to reach the current session.

pub mod cookie_manager;
pub mod error;
pub mod extract;
pub mod settings;

pub use cookie_manager::CookieManager;
pub use error::GatewayError;
pub use extract::CurrentSession;
pub use settings::{CookieSettings, SameSitePolicy};
