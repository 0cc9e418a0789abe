//! Session cookie settings

use cookie::SameSite;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSitePolicy {
    Strict,
    Lax,
    None,
}

impl From<SameSitePolicy> for SameSite {
    fn from(policy: SameSitePolicy) -> Self {
        match policy {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::Lax => SameSite::Lax,
            SameSitePolicy::None => SameSite::None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieSettings {
    /// Name of the cookie carrying the session id
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_path")]
    pub path: String,

    /// Max-Age sent with new session cookies
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: i64,

    /// Only send the cookie over HTTPS
    #[serde(default = "default_secure")]
    pub secure: bool,

    /// Omitted from the cookie when unset
    #[serde(default)]
    pub same_site: Option<SameSitePolicy>,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            name: default_name(),
            path: default_path(),
            max_age_secs: default_max_age_secs(),
            secure: default_secure(),
            same_site: None,
        }
    }
}

fn default_name() -> String {
    "session_id".to_string()
}

fn default_path() -> String {
    "/".to_string()
}

fn default_max_age_secs() -> i64 {
    3600
}

fn default_secure() -> bool {
    true
}
