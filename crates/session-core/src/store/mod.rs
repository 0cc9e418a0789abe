//! Session stores

mod memory;
mod sweeper;

pub use crate::metrics::StoreStats;
pub use memory::MemoryStore;

use crate::error::SessionError;
use crate::session::SessionRef;

/// Registry of live sessions keyed by id.
pub trait SessionStore: Send + Sync {
    /// Look up a session and mark it accessed now.
    ///
    /// Lookups are not side-effect free: every hit slides the session's
    /// expiry window forward.
    fn get(&self, id: &str) -> Result<SessionRef, SessionError>;

    /// Insert a session, replacing any entry with the same id.
    fn add(&self, session: SessionRef);

    /// Remove a session. Unknown ids are ignored.
    fn remove(&self, session: &SessionRef);
}
