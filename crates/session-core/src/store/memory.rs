use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::sweeper::{SessionMap, Sweeper};
use super::SessionStore;
use crate::clock::{Clock, SystemClock};
use crate::error::SessionError;
use crate::metrics::{StoreMetrics, StoreStats};
use crate::session::SessionRef;

struct SweepHandle {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

/// Thread-safe in-memory session store with periodic idle eviction.
///
/// The sweep task is spawned on the current tokio runtime when the store is
/// built and runs until [`MemoryStore::close`] / [`MemoryStore::shutdown`]
/// or until the store is dropped.
pub struct MemoryStore {
    sessions: SessionMap,
    metrics: Arc<StoreMetrics>,
    clock: Arc<dyn Clock>,
    sweep: Mutex<Option<SweepHandle>>,
}

impl MemoryStore {
    pub fn new(sweep_interval: Duration) -> Result<Self, SessionError> {
        Self::with_clock(sweep_interval, Arc::new(SystemClock))
    }

    pub fn with_clock(sweep_interval: Duration, clock: Arc<dyn Clock>) -> Result<Self, SessionError> {
        if sweep_interval.is_zero() {
            return Err(SessionError::InvalidSweepInterval);
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| SessionError::NoRuntime)?;

        let sessions: SessionMap = Arc::new(RwLock::new(HashMap::new()));
        let metrics = Arc::new(StoreMetrics::new());

        let sweeper = Sweeper::new(sessions.clone(), metrics.clone(), clock.clone());
        let (stop, stop_rx) = oneshot::channel();
        let task = runtime.spawn(sweeper.run(sweep_interval, stop_rx));

        info!("Session store started (sweep interval: {:?})", sweep_interval);

        Ok(Self {
            sessions,
            metrics,
            clock,
            sweep: Mutex::new(Some(SweepHandle { stop, task })),
        })
    }

    /// Stop the sweep task. Sessions stay reachable through get/add/remove,
    /// but nothing expires automatically any more.
    pub fn close(&self) -> Result<(), SessionError> {
        let handle = self.take_sweep()?;
        // Err means the task is already gone
        let _ = handle.stop.send(());
        Ok(())
    }

    /// Stop the sweep task and wait for it to finish.
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        let handle = self.take_sweep()?;
        let _ = handle.stop.send(());
        if let Err(e) = handle.task.await {
            debug!("Sweep task ended abnormally: {}", e);
        }
        Ok(())
    }

    fn take_sweep(&self) -> Result<SweepHandle, SessionError> {
        let handle = self.sweep.lock().take().ok_or(SessionError::AlreadyClosed)?;
        info!("Session store closing");
        Ok(handle)
    }

    /// Time source used for access stamps and sweeps.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn is_closed(&self) -> bool {
        self.sweep.lock().is_none()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        self.metrics.snapshot(self.len())
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, id: &str) -> Result<SessionRef, SessionError> {
        let map = self.sessions.read();
        match map.get(id) {
            Some(session) => {
                session.access(self.clock.now());
                self.metrics.inc_hit();
                Ok(session.clone())
            }
            None => {
                self.metrics.inc_miss();
                debug!("Session lookup miss");
                Err(SessionError::NotFound(id.to_string()))
            }
        }
    }

    fn add(&self, session: SessionRef) {
        let id = session.id().to_string();
        self.sessions.write().insert(id, session);
    }

    fn remove(&self, session: &SessionRef) {
        self.sessions.write().remove(session.id());
    }
}
