//! Lock configuration types

use rdlock_domain::constants::DEFAULT_LEASE_DURATION_SECS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lock configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LockConfig {
    /// Lease duration in seconds
    ///
    /// One value drives both the store TTL and the expiry embedded in tokens.
    pub lease_duration_secs: u64,
}

impl LockConfig {
    /// Lease as a [`Duration`]
    pub fn lease(&self) -> Duration {
        Duration::from_secs(self.lease_duration_secs)
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            lease_duration_secs: DEFAULT_LEASE_DURATION_SECS,
        }
    }
}
