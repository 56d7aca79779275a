//! # rdlock
//!
//! Lease-based distributed locks over a shared key-value store.
//!
//! A lock is a single store entry whose value is a [`LockToken`] carrying its
//! expiry. Acquisition is one optimistic attempt: create the entry if absent,
//! otherwise take it over atomically once its lease has ended. Release
//! deletes the entry only while it still holds the caller's token.
//!
//! ## Example
//!
//! ```ignore
//! use rdlock::infrastructure::{ConfigLoader, build_lock_manager};
//!
//! let config = ConfigLoader::new().load()?;
//! let manager = build_lock_manager(&config)?;
//!
//! if manager.lock("nightly-report").await? {
//!     // ... critical section ...
//!     manager.release("nightly-report").await?;
//! }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Token codec, store contract and error model
//! - `application` - Lock manager and provider registry
//! - `providers` - Redis and in-memory lock stores
//! - `infrastructure` - Configuration, logging and bootstrap
//! - [`cli`] - The `rdlock` command line tool

pub mod cli;

/// Domain layer - token codec, ports and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use rdlock_domain::*;
}

/// Application layer - lock manager and provider registry
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use rdlock_application::*;
}

/// Store providers
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use rdlock_providers::*;
}

/// Infrastructure layer - config, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use rdlock_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the lock manager at the crate root
pub use application::LockManager;
