pub mod auth;
pub mod health;
pub mod session;

use chrono::{DateTime, Utc};
use serde::Serialize;
use session_core::{Session, SessionExt, SessionRef};

pub const USERNAME_ATTRIBUTE: &str = "username";
pub const VISITS_ATTRIBUTE: &str = "visits";

/// Attributes owned by the server. Clients may read them but not write them.
pub const RESERVED_ATTRIBUTES: [&str; 2] = [USERNAME_ATTRIBUTE, VISITS_ATTRIBUTE];

/// Session view returned by the API. The id itself stays in the cookie.
#[derive(Debug, Serialize)]
pub struct SessionDto {
    pub created: DateTime<Utc>,
    pub accessed: DateTime<Utc>,
    pub timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub visits: u64,
}

impl From<&SessionRef> for SessionDto {
    fn from(session: &SessionRef) -> Self {
        Self {
            created: session.created(),
            accessed: session.accessed(),
            timeout_secs: session.timeout().as_secs(),
            username: session.attribute_as(USERNAME_ATTRIBUTE).ok().flatten(),
            visits: session.attribute_as(VISITS_ATTRIBUTE).ok().flatten().unwrap_or(0),
        }
    }
}
