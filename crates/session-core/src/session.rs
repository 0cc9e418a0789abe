//! Session entity

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::error::SessionError;
use crate::id::generate_id;

/// Attribute values are stored as JSON values. Keeping one type per key is
/// up to the caller.
pub type AttributeValue = serde_json::Value;

/// A session shared between the store and request handlers.
pub type SessionRef = Arc<dyn Session>;

pub trait Session: Send + Sync + fmt::Debug {
    fn id(&self) -> &str;

    /// Value of a named attribute, `None` if it was never set.
    fn attribute(&self, name: &str) -> Option<AttributeValue>;

    /// Insert or overwrite a named attribute.
    fn set_attribute(&self, name: &str, value: AttributeValue);

    fn created(&self) -> DateTime<Utc>;

    fn accessed(&self) -> DateTime<Utc>;

    /// Idle time after which the session may be evicted.
    fn timeout(&self) -> Duration;

    /// Record an access at `at`. Called by stores on lookup.
    fn access(&self, at: DateTime<Utc>);

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let Ok(timeout) = TimeDelta::from_std(self.timeout()) else {
            return false;
        };
        now.signed_duration_since(self.accessed()) > timeout
    }
}

/// In-memory session.
pub struct MemorySession {
    id: String,
    created: DateTime<Utc>,
    accessed_ms: AtomicI64,
    timeout: Duration,
    attributes: RwLock<HashMap<String, AttributeValue>>,
}

impl MemorySession {
    /// New session with a freshly generated id of `id_length` random bytes,
    /// created at wall-clock now.
    pub fn new(id_length: usize, timeout: Duration) -> Result<Self, SessionError> {
        Self::new_at(id_length, timeout, &SystemClock)
    }

    /// Like [`MemorySession::new`], with `created` read from `clock`. Pass the
    /// store's clock so creation and access times share one time source.
    pub fn new_at(id_length: usize, timeout: Duration, clock: &dyn Clock) -> Result<Self, SessionError> {
        let id = generate_id(id_length)?;
        Ok(Self::with_id(id, timeout, clock.now()))
    }

    pub fn with_id(id: impl Into<String>, timeout: Duration, created: DateTime<Utc>) -> Self {
        // accessed is kept at millisecond resolution, so created is too;
        // otherwise a fresh session could report accessed < created.
        let created_ms = created.timestamp_millis();
        let created = DateTime::from_timestamp_millis(created_ms).unwrap_or(created);
        Self {
            id: id.into(),
            created,
            accessed_ms: AtomicI64::new(created_ms),
            timeout,
            attributes: RwLock::new(HashMap::new()),
        }
    }

    pub fn into_ref(self) -> SessionRef {
        Arc::new(self)
    }

    pub fn remove_attribute(&self, name: &str) -> Option<AttributeValue> {
        self.attributes.write().remove(name)
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.read().len()
    }
}

impl Session for MemorySession {
    fn id(&self) -> &str {
        &self.id
    }

    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        self.attributes.read().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: AttributeValue) {
        self.attributes.write().insert(name.to_string(), value);
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn accessed(&self) -> DateTime<Utc> {
        let ms = self.accessed_ms.load(Ordering::Relaxed);
        DateTime::from_timestamp_millis(ms).unwrap_or(self.created)
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn access(&self, at: DateTime<Utc>) {
        // fetch_max keeps accessed monotonic under concurrent lookups
        self.accessed_ms
            .fetch_max(at.timestamp_millis(), Ordering::Relaxed);
    }
}

impl fmt::Debug for MemorySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySession")
            .field("id", &self.id)
            .field("created", &self.created)
            .field("accessed", &self.accessed())
            .field("timeout", &self.timeout)
            .field("attributes", &self.attribute_count())
            .finish()
    }
}

/// Typed access to session attributes.
pub trait SessionExt {
    fn attribute_as<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, SessionError>;

    fn set_attribute_as<T: Serialize + ?Sized>(
        &self,
        name: &str,
        value: &T,
    ) -> Result<(), SessionError>;
}

impl<S: Session + ?Sized> SessionExt for S {
    fn attribute_as<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, SessionError> {
        self.attribute(name)
            .map(|v| {
                serde_json::from_value(v).map_err(|e| SessionError::AttributeConversion {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    fn set_attribute_as<T: Serialize + ?Sized>(
        &self,
        name: &str,
        value: &T,
    ) -> Result<(), SessionError> {
        let value = serde_json::to_value(value).map_err(|e| SessionError::AttributeConversion {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        self.set_attribute(name, value);
        Ok(())
    }
}
