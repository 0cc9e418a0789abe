//! # Session Core
//!
//! Server-side sessions: id generation, the session entity, and a concurrent
//! in-memory store with idle-timeout eviction.

pub mod clock;
pub mod config;
pub mod error;
pub mod id;
pub mod metrics;
pub mod session;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SessionConfig;
pub use error::SessionError;
pub use session::{AttributeValue, MemorySession, Session, SessionExt, SessionRef};
pub use store::{MemoryStore, SessionStore, StoreStats};
