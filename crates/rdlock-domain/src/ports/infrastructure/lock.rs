//! Distributed Lock Port
//!
//! Defines the contract calling code depends on to coordinate with other
//! processes through a named lock.

use crate::error::Result;
use async_trait::async_trait;

/// Distributed lock interface
///
/// Both operations are single-shot. `Ok(false)` from [`lock`](Self::lock)
/// means the lock is legitimately held elsewhere; `Ok(false)` from
/// [`release`](Self::release) means the caller no longer held it. Store
/// failures are always `Err`.
#[async_trait]
pub trait DistributedLock: Send + Sync {
    /// Attempt to acquire `name` once
    async fn lock(&self, name: &str) -> Result<bool>;

    /// Release `name` if the caller still holds it
    async fn release(&self, name: &str) -> Result<bool>;
}
