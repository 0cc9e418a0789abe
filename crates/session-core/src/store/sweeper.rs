use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::metrics::StoreMetrics;
use crate::session::SessionRef;

pub(crate) type SessionMap = Arc<RwLock<HashMap<String, SessionRef>>>;

/// Background eviction of idle sessions.
pub(crate) struct Sweeper {
    sessions: SessionMap,
    metrics: Arc<StoreMetrics>,
    clock: Arc<dyn Clock>,
}

impl Sweeper {
    pub(crate) fn new(sessions: SessionMap, metrics: Arc<StoreMetrics>, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions,
            metrics,
            clock,
        }
    }

    /// Evict every session idle for longer than its timeout as of `now`.
    ///
    /// Scans under the read lock, then deletes under the write lock. A
    /// session touched between the two phases is still evicted.
    pub(crate) fn sweep(&self, now: DateTime<Utc>) -> usize {
        let expired: Vec<String> = {
            let map = self.sessions.read();
            map.iter()
                .filter(|(_, session)| session.is_expired(now))
                .map(|(id, _)| id.clone())
                .collect()
        };

        self.metrics.inc_sweeps();
        if expired.is_empty() {
            return 0;
        }

        let mut removed = 0;
        {
            let mut map = self.sessions.write();
            for id in &expired {
                if map.remove(id).is_some() {
                    removed += 1;
                }
            }
        }

        self.metrics.inc_evictions(removed as u64);
        removed
    }

    /// Sweep every `interval` until `stop` fires or its sender is dropped.
    pub(crate) async fn run(self, interval: Duration, mut stop: oneshot::Receiver<()>) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // first tick completes immediately
        ticker.tick().await;

        debug!("Session sweep started (interval: {:?})", interval);

        loop {
            tokio::select! {
                _ = &mut stop => break,
                _ = ticker.tick() => {
                    let evicted = self.sweep(self.clock.now());
                    if evicted > 0 {
                        info!("Evicted {} idle sessions", evicted);
                    }
                }
            }
        }

        debug!("Session sweep stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::session::MemorySession;
    use chrono::TimeDelta;

    fn map_with(sessions: Vec<SessionRef>) -> SessionMap {
        let map = sessions
            .into_iter()
            .map(|s| (s.id().to_string(), s))
            .collect::<HashMap<_, _>>();
        Arc::new(RwLock::new(map))
    }

    #[test]
    fn test_sweep_removes_only_idle_sessions() {
        let start = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let sessions = map_with(vec![
            MemorySession::with_id("short", Duration::from_millis(20), start).into_ref(),
            MemorySession::with_id("long", Duration::from_millis(900), start).into_ref(),
        ]);
        let metrics = Arc::new(StoreMetrics::new());
        let sweeper = Sweeper::new(sessions.clone(), metrics.clone(), clock.clone());

        clock.advance(Duration::from_millis(200));
        assert_eq!(sweeper.sweep(clock.now()), 1);

        let map = sessions.read();
        assert!(!map.contains_key("short"));
        assert!(map.contains_key("long"));

        let stats = metrics.snapshot(map.len());
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.sweeps, 1);
    }

    #[test]
    fn test_recent_access_survives_sweep() {
        let start = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let session = MemorySession::with_id("busy", Duration::from_secs(1), start).into_ref();
        let sessions = map_with(vec![session.clone()]);
        let sweeper = Sweeper::new(
            sessions.clone(),
            Arc::new(StoreMetrics::new()),
            Arc::new(ManualClock::new(start)),
        );

        session.access(start + TimeDelta::milliseconds(900));
        assert_eq!(sweeper.sweep(start + TimeDelta::milliseconds(1500)), 0);
        assert_eq!(sweeper.sweep(start + TimeDelta::milliseconds(2000)), 1);
        assert!(sessions.read().is_empty());
    }

    #[test]
    fn test_sweep_empty_map() {
        let sweeper = Sweeper::new(
            map_with(Vec::new()),
            Arc::new(StoreMetrics::new()),
            Arc::new(ManualClock::new(Utc::now())),
        );
        assert_eq!(sweeper.sweep(Utc::now()), 0);
    }
}
