//! Shared test helpers

use async_trait::async_trait;
use rdlock_application::LockManager;
use rdlock_domain::error::{Error, Result};
use rdlock_domain::{LockStore, LockToken, ManualClock};
use rdlock_providers::InMemoryLockStore;
use std::sync::Arc;
use std::time::Duration;

pub const LEASE: Duration = Duration::from_secs(5);

/// Shared store and clock seen by every simulated process
pub struct Cluster {
    pub clock: Arc<ManualClock>,
    pub store: Arc<InMemoryLockStore>,
}

impl Cluster {
    pub fn at(now_ms: i64) -> Self {
        let clock = Arc::new(ManualClock::new(now_ms));
        let store = Arc::new(InMemoryLockStore::with_clock(clock.clone()));
        Self { clock, store }
    }

    /// A new, independent lock manager ("process") on the shared store
    pub fn process(&self) -> LockManager {
        LockManager::with_clock(self.store.clone(), self.clock.clone(), LEASE).unwrap()
    }

    /// Seed an entry whose embedded expiry is `expires_at_ms` but whose store
    /// TTL is long, as written by a participant with a longer store TTL
    pub async fn seed_expiring(&self, name: &str, expires_at_ms: i64) -> LockToken {
        let token = LockToken::issue(expires_at_ms);
        assert!(
            self.store
                .create_if_absent(name, &token, Duration::from_secs(3600))
                .await
                .unwrap()
        );
        token
    }
}

/// Which operation a [`FailingStore`] should fail on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Everything,
    Steal,
    CompareAndDelete,
}

/// Store double delegating to an in-memory store except where told to fail
pub struct FailingStore {
    pub inner: InMemoryLockStore,
    pub fail_on: FailOn,
}

impl FailingStore {
    pub fn new(inner: InMemoryLockStore, fail_on: FailOn) -> Self {
        Self { inner, fail_on }
    }

    fn unavailable() -> Error {
        Error::store_unavailable("connection reset by peer")
    }
}

#[async_trait]
impl LockStore for FailingStore {
    async fn read(&self, name: &str) -> Result<Option<LockToken>> {
        if self.fail_on == FailOn::Everything {
            return Err(Self::unavailable());
        }
        self.inner.read(name).await
    }

    async fn create_if_absent(
        &self,
        name: &str,
        token: &LockToken,
        ttl: Duration,
    ) -> Result<bool> {
        if self.fail_on == FailOn::Everything {
            return Err(Self::unavailable());
        }
        self.inner.create_if_absent(name, token, ttl).await
    }

    async fn steal_if_expired(
        &self,
        name: &str,
        expected_old: &LockToken,
        new_token: &LockToken,
        now_ms: i64,
        ttl: Duration,
    ) -> Result<bool> {
        if matches!(self.fail_on, FailOn::Everything | FailOn::Steal) {
            return Err(Error::store_operation("NOSCRIPT No matching script"));
        }
        self.inner
            .steal_if_expired(name, expected_old, new_token, now_ms, ttl)
            .await
    }

    async fn compare_and_delete(&self, name: &str, expected: &LockToken) -> Result<bool> {
        if matches!(self.fail_on, FailOn::Everything | FailOn::CompareAndDelete) {
            return Err(Error::store_operation("BUSY Redis is busy running a script"));
        }
        self.inner.compare_and_delete(name, expected).await
    }

    fn provider_name(&self) -> &str {
        "failing"
    }
}
