//! Session settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::id::DEFAULT_ID_LENGTH;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    /// Random bytes per id, before encoding
    #[serde(default = "default_id_length")]
    pub id_length: usize,

    /// Idle time after which a session becomes eligible for eviction
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    /// How often the store sweeps for idle sessions
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            id_length: default_id_length(),
            idle_timeout_secs: default_idle_timeout_secs(),
            sweep_interval_ms: default_sweep_interval_ms(),
        }
    }
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

fn default_id_length() -> usize {
    DEFAULT_ID_LENGTH
}

fn default_idle_timeout_secs() -> u64 {
    1800
}

fn default_sweep_interval_ms() -> u64 {
    60_000
}
