//! Lock Manager Use Case
//!
//! Arbitrates ownership of named locks through a shared [`LockStore`].
//! All correctness-critical state lives in the store; the manager holds its
//! configuration plus a record of the tokens it has written, so that
//! `release(name)` can prove ownership.
//!
//! ## Acquisition
//!
//! One optimistic attempt per call, no sleeping and no retry loop:
//!
//! 1. Issue a token expiring at `now + lease`.
//! 2. `create_if_absent`; success means the lock is ours.
//! 3. Otherwise read the current entry. If it vanished in between, this
//!    attempt fails (the create is not retried).
//! 4. If the current token's expiry is in the past, try a single atomic
//!    `steal_if_expired`. Only one racing stealer can win.
//! 5. An unexpired entry means the lock is legitimately held.
//!
//! Retry cadence, backoff and deadlines belong to the caller.
//!
//! ## Release
//!
//! Read the entry; an absent entry is already released (`Ok(true)`).
//! Otherwise `compare_and_delete` with the caller's own token. The
//! store-side comparison is authoritative, so a stale view can only produce
//! a spurious `false`, never delete another owner's entry.

use async_trait::async_trait;
use dashmap::DashMap;
use rdlock_domain::error::{Error, Result};
use rdlock_domain::{Clock, DistributedLock, LockStore, LockToken, SystemClock};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Coordinates named locks over a shared store
///
/// Cheap to construct; any number of managers, in one process or many, may
/// share a store safely.
pub struct LockManager {
    store: Arc<dyn LockStore>,
    clock: Arc<dyn Clock>,
    lease: Duration,
    held: DashMap<String, LockToken>,
}

impl LockManager {
    /// Create a manager using the system wall clock
    pub fn new(store: Arc<dyn LockStore>, lease: Duration) -> Result<Self> {
        Self::with_clock(store, Arc::new(SystemClock), lease)
    }

    /// Create a manager with an explicit clock
    pub fn with_clock(
        store: Arc<dyn LockStore>,
        clock: Arc<dyn Clock>,
        lease: Duration,
    ) -> Result<Self> {
        // Tokens and store TTLs have millisecond resolution
        if lease.as_millis() == 0 {
            return Err(Error::invalid_argument(
                "Lease duration must be at least 1 millisecond",
            ));
        }
        Ok(Self {
            store,
            clock,
            lease,
            held: DashMap::new(),
        })
    }

    /// Configured lease duration
    pub fn lease(&self) -> Duration {
        self.lease
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<dyn LockStore> {
        &self.store
    }

    /// Attempt one acquisition, returning the token written on success
    ///
    /// `Ok(None)` means the lock is held by someone else (or changed hands
    /// while this attempt was running).
    pub async fn try_lock(&self, name: &str) -> Result<Option<LockToken>> {
        validate_name(name)?;

        let new_token = LockToken::for_lease(self.clock.now_millis(), self.lease);
        debug!(lock = name, store = self.store.provider_name(), "Acquiring lock");

        if self
            .store
            .create_if_absent(name, &new_token, self.lease)
            .await?
        {
            info!(lock = name, "Lock acquired");
            return Ok(Some(new_token));
        }

        self.try_steal(name, new_token).await
    }

    /// Fallback path: take over the entry if its lease has ended
    async fn try_steal(&self, name: &str, new_token: LockToken) -> Result<Option<LockToken>> {
        let Some(existing) = self.store.read(name).await? else {
            debug!(lock = name, "Lock entry disappeared before inspection");
            return Ok(None);
        };

        let now_ms = self.clock.now_millis();
        let expired = match existing.is_expired_at(now_ms) {
            Ok(expired) => expired,
            Err(e) => {
                warn!(
                    lock = name,
                    error = %e,
                    "Existing lock entry has no readable expiry; leaving it to the store TTL"
                );
                return Ok(None);
            }
        };

        if !expired {
            debug!(lock = name, "Lock is held and its lease is still running");
            return Ok(None);
        }

        if self
            .store
            .steal_if_expired(name, &existing, &new_token, now_ms, self.lease)
            .await?
        {
            info!(lock = name, previous = %existing, "Expired lock taken over");
            Ok(Some(new_token))
        } else {
            debug!(lock = name, "Another claimant took over the expired lock first");
            Ok(None)
        }
    }

    /// Attempt one acquisition and remember the token for [`release`](Self::release)
    pub async fn lock(&self, name: &str) -> Result<bool> {
        match self.try_lock(name).await? {
            Some(token) => {
                self.held.insert(name.to_string(), token);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Release a lock previously acquired through [`lock`](Self::lock)
    ///
    /// `Ok(true)` when this call removed the entry or the entry was already
    /// gone; `Ok(false)` when the entry belongs to someone else (including
    /// the case where this manager never acquired it).
    pub async fn release(&self, name: &str) -> Result<bool> {
        validate_name(name)?;

        let Some(current) = self.store.read(name).await? else {
            self.held.remove(name);
            info!(lock = name, "Lock already released");
            return Ok(true);
        };

        let Some(own) = self.held.get(name).map(|entry| entry.value().clone()) else {
            debug!(lock = name, holder = %current, "No token recorded for this lock");
            return Ok(false);
        };

        self.compare_and_delete(name, &current, &own).await
    }

    /// Release `name` on behalf of the holder of `token`
    pub async fn release_token(&self, name: &str, token: &LockToken) -> Result<bool> {
        validate_name(name)?;

        let Some(current) = self.store.read(name).await? else {
            self.forget_if_matches(name, token);
            info!(lock = name, "Lock already released");
            return Ok(true);
        };

        self.compare_and_delete(name, &current, token).await
    }

    async fn compare_and_delete(
        &self,
        name: &str,
        current: &LockToken,
        own: &LockToken,
    ) -> Result<bool> {
        let released = self.store.compare_and_delete(name, own).await?;
        self.forget_if_matches(name, own);

        if released {
            info!(lock = name, "Lock released");
        } else {
            debug!(lock = name, holder = %current, "Lock is owned by another token");
        }
        Ok(released)
    }

    /// Read the token currently stored under `name`
    pub async fn inspect(&self, name: &str) -> Result<Option<LockToken>> {
        validate_name(name)?;
        self.store.read(name).await
    }

    /// Token this manager wrote for `name`, if it believes it holds the lock
    ///
    /// The recorded token may be stale: another claimant can take over the
    /// entry once the lease ends, and the record is only cleared by the next
    /// `release` for `name`. Use [`inspect`](Self::inspect) for the store's view.
    pub fn held_token(&self, name: &str) -> Option<LockToken> {
        self.held.get(name).map(|entry| entry.value().clone())
    }

    fn forget_if_matches(&self, name: &str, token: &LockToken) {
        self.held.remove_if(name, |_, held| held == token);
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_argument("Lock name cannot be empty"));
    }
    Ok(())
}

#[async_trait]
impl DistributedLock for LockManager {
    async fn lock(&self, name: &str) -> Result<bool> {
        LockManager::lock(self, name).await
    }

    async fn release(&self, name: &str) -> Result<bool> {
        LockManager::release(self, name).await
    }
}

impl fmt::Debug for LockManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockManager")
            .field("store", &self.store.provider_name())
            .field("lease", &self.lease)
            .field("held", &self.held.len())
            .finish_non_exhaustive()
    }
}
