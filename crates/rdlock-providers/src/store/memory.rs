//! In-memory lock store provider
//!
//! Single-process store honouring the full [`LockStore`] contract, including
//! store-side TTL. Every operation runs under the shard lock of its key, which
//! gives the same per-key atomicity Redis provides. Useful for tests and for
//! coordinating tasks inside one process.
//!
//! ## Example
//!
//! ```ignore
//! use rdlock_providers::InMemoryLockStore;
//!
//! let store = InMemoryLockStore::new();
//! ```

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rdlock_domain::error::Result;
use rdlock_domain::{Clock, LockStore, LockToken, SystemClock};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

#[derive(Debug, Clone)]
struct StoredEntry {
    token: LockToken,
    ttl_deadline_ms: i64,
}

impl StoredEntry {
    fn new(token: LockToken, now_ms: i64, ttl: Duration) -> Self {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        Self {
            token,
            ttl_deadline_ms: now_ms.saturating_add(ttl_ms),
        }
    }

    fn is_live(&self, now_ms: i64) -> bool {
        now_ms < self.ttl_deadline_ms
    }
}

/// In-memory lock store
#[derive(Debug, Clone)]
pub struct InMemoryLockStore {
    entries: Arc<DashMap<String, StoredEntry>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryLockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLockStore {
    /// Create a store whose TTLs follow the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a store whose TTLs follow `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            clock,
        }
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let now_ms = self.clock.now_millis();
        self.entries.iter().filter(|e| e.is_live(now_ms)).count()
    }

    /// Whether the store has no live entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry whose store TTL has elapsed, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now_ms = self.clock.now_millis();
        let mut removed = 0;
        self.entries.retain(|_, e| {
            let live = e.is_live(now_ms);
            if !live {
                removed += 1;
            }
            live
        });
        removed
    }

    /// Number of stored entries, including dead ones not yet swept
    pub fn stored_len(&self) -> usize {
        self.entries.len()
    }

    fn sweep(&self, name: &str, now_ms: i64) {
        self.entries.remove_if(name, |_, e| !e.is_live(now_ms));
    }

    /// Remaining store TTL of `name`, if it holds a live entry
    pub fn ttl(&self, name: &str) -> Option<Duration> {
        let now_ms = self.clock.now_millis();
        self.entries
            .get(name)
            .filter(|e| e.is_live(now_ms))
            .map(|e| Duration::from_millis(u64::try_from(e.ttl_deadline_ms - now_ms).unwrap_or(0)))
    }
}

#[async_trait]
impl LockStore for InMemoryLockStore {
    async fn read(&self, name: &str) -> Result<Option<LockToken>> {
        let now_ms = self.clock.now_millis();
        self.sweep(name, now_ms);
        Ok(self
            .entries
            .get(name)
            .filter(|e| e.is_live(now_ms))
            .map(|e| e.token.clone()))
    }

    async fn create_if_absent(
        &self,
        name: &str,
        token: &LockToken,
        ttl: Duration,
    ) -> Result<bool> {
        let now_ms = self.clock.now_millis();
        let created = match self.entries.entry(name.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_live(now_ms) {
                    false
                } else {
                    occupied.insert(StoredEntry::new(token.clone(), now_ms, ttl));
                    true
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(StoredEntry::new(token.clone(), now_ms, ttl));
                true
            }
        };
        trace!(lock = name, created, "create_if_absent");
        Ok(created)
    }

    async fn steal_if_expired(
        &self,
        name: &str,
        expected_old: &LockToken,
        new_token: &LockToken,
        now_ms: i64,
        ttl: Duration,
    ) -> Result<bool> {
        let store_now_ms = self.clock.now_millis();
        let stolen = match self.entries.entry(name.to_string()) {
            Entry::Occupied(mut occupied) => {
                let current = occupied.get();
                let replace = !current.is_live(store_now_ms)
                    || (current.token == *expected_old
                        && current.token.is_expired_at(now_ms).unwrap_or(false));
                if replace {
                    occupied.insert(StoredEntry::new(new_token.clone(), store_now_ms, ttl));
                }
                replace
            }
            Entry::Vacant(vacant) => {
                vacant.insert(StoredEntry::new(new_token.clone(), store_now_ms, ttl));
                true
            }
        };
        trace!(lock = name, stolen, "steal_if_expired");
        Ok(stolen)
    }

    async fn compare_and_delete(&self, name: &str, expected: &LockToken) -> Result<bool> {
        let now_ms = self.clock.now_millis();
        self.sweep(name, now_ms);
        let deleted = self
            .entries
            .remove_if(name, |_, e| e.is_live(now_ms) && e.token == *expected)
            .is_some();
        trace!(lock = name, deleted, "compare_and_delete");
        Ok(deleted)
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use rdlock_application::ports::registry::{
    LOCK_STORE_PROVIDERS, LockStoreProviderConfig, LockStoreProviderEntry,
};

/// Factory function for creating in-memory lock store instances.
fn memory_store_factory(
    _config: &LockStoreProviderConfig,
) -> std::result::Result<Arc<dyn LockStore>, String> {
    Ok(Arc::new(InMemoryLockStore::new()))
}

#[linkme::distributed_slice(LOCK_STORE_PROVIDERS)]
static MEMORY_PROVIDER: LockStoreProviderEntry = LockStoreProviderEntry {
    name: "memory",
    description: "In-process lock store (single process only)",
    factory: memory_store_factory,
};
