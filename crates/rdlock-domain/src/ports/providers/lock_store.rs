//! Lock Store Provider Port
//!
//! The four primitives below are the entire atomicity boundary of the lock
//! protocol. Each must execute as one atomic unit on the store, with no
//! intermediate state observable by other callers. Any store offering
//! equivalent guarantees (native compare-and-set with TTL, or server-side
//! scripting) can implement this port.
//!
//! ## Failure model
//!
//! `Ok(false)` is reserved for "the condition did not hold". A store that
//! cannot be reached returns [`Error::StoreUnavailable`]; a command or script
//! that fails to execute returns [`Error::StoreOperation`].
//!
//! [`Error::StoreUnavailable`]: crate::error::Error::StoreUnavailable
//! [`Error::StoreOperation`]: crate::error::Error::StoreOperation

use crate::error::Result;
use crate::value_objects::LockToken;
use async_trait::async_trait;
use std::time::Duration;

/// Shared key-value store holding lock entries
#[async_trait]
pub trait LockStore: Send + Sync {
    /// Read the token currently stored under `name`
    async fn read(&self, name: &str) -> Result<Option<LockToken>>;

    /// Create `name` with `token` and a store TTL, only if no entry exists
    ///
    /// Returns `true` iff this call created the entry. An existing entry is
    /// left unchanged.
    async fn create_if_absent(&self, name: &str, token: &LockToken, ttl: Duration)
    -> Result<bool>;

    /// Replace an expired entry with `new_token`
    ///
    /// Atomically re-reads the current value and replaces it (setting `ttl`)
    /// when the entry is absent, or when it still equals `expected_old` and
    /// its embedded expiry is earlier than `now_ms`. The freshness check is
    /// performed here, not trusted from the caller's earlier read. Values
    /// whose expiry cannot be decoded are never replaced.
    async fn steal_if_expired(
        &self,
        name: &str,
        expected_old: &LockToken,
        new_token: &LockToken,
        now_ms: i64,
        ttl: Duration,
    ) -> Result<bool>;

    /// Delete `name` iff its current value equals `expected`
    async fn compare_and_delete(&self, name: &str, expected: &LockToken) -> Result<bool>;

    /// Get the name of this provider
    fn provider_name(&self) -> &str;
}
