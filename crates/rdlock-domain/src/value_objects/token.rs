//! Lock token value object
//!
//! A token is the value a claimant writes under a lock name. It carries the
//! absolute expiry instant of the lease (epoch milliseconds) followed by a
//! random owner id, so two claimants issuing in the same millisecond still
//! write distinct values:
//!
//! ```text
//! 1720512000123:6f1c0d2e9a4b4c7f8e3d2a1b0c9d8e7f
//! ^expiry_ms    ^owner_id
//! ```
//!
//! A bare `"<expiry_ms>"` value is also accepted when decoding. The store-side
//! steal script parses the same expiry prefix, so both sides agree on what
//! "expired" means.

use crate::constants::TOKEN_SEPARATOR;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Opaque value asserting ownership of a lock entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockToken(String);

impl LockToken {
    /// Issue a fresh token expiring at `expires_at_ms`
    pub fn issue(expires_at_ms: i64) -> Self {
        Self(format!(
            "{expires_at_ms}{TOKEN_SEPARATOR}{}",
            Uuid::new_v4().simple()
        ))
    }

    /// Issue a fresh token for a lease starting at `now_ms`
    pub fn for_lease(now_ms: i64, lease: Duration) -> Self {
        let lease_ms = i64::try_from(lease.as_millis()).unwrap_or(i64::MAX);
        Self::issue(now_ms.saturating_add(lease_ms))
    }

    /// Wrap a raw value read back from the store
    ///
    /// No validation happens here; a store may hold values written by other
    /// clients, and decoding is deferred to [`LockToken::expires_at_ms`].
    pub fn from_raw<S: Into<String>>(raw: S) -> Self {
        Self(raw.into())
    }

    /// Raw value as stored
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token, returning the raw value
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Decode the embedded expiry instant (epoch milliseconds)
    pub fn expires_at_ms(&self) -> Result<i64> {
        let prefix = match self.0.split_once(TOKEN_SEPARATOR) {
            Some((prefix, _)) => prefix,
            None => self.0.as_str(),
        };
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_token(self.0.clone()));
        }
        prefix
            .parse::<i64>()
            .map_err(|_| Error::invalid_token(self.0.clone()))
    }

    /// Owner id, when the token carries one
    pub fn owner_id(&self) -> Option<&str> {
        self.0
            .split_once(TOKEN_SEPARATOR)
            .map(|(_, owner)| owner)
            .filter(|owner| !owner.is_empty())
    }

    /// Whether the lease ended strictly before `now_ms`
    pub fn is_expired_at(&self, now_ms: i64) -> Result<bool> {
        Ok(self.expires_at_ms()? < now_ms)
    }

    /// Time left on the lease as seen at `now_ms` (zero once expired)
    pub fn remaining_at(&self, now_ms: i64) -> Result<Duration> {
        let remaining = self.expires_at_ms()?.saturating_sub(now_ms);
        Ok(Duration::from_millis(u64::try_from(remaining).unwrap_or(0)))
    }
}

impl fmt::Display for LockToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LockToken {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for LockToken {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl AsRef<str> for LockToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
