//! Domain Port Interfaces
//!
//! Defines the boundary contracts between the locking protocol and the
//! outside world. Ports are implemented by `rdlock-providers` (stores) and
//! `rdlock-application` (the lock manager).
//!
//! ## Organization
//!
//! - **infrastructure/** - Time source and the public lock abstraction
//! - **providers/** - Backing store contract

/// Infrastructure service ports
pub mod infrastructure;
/// External service provider ports
pub mod providers;

pub use infrastructure::{Clock, DistributedLock, ManualClock, SystemClock};
pub use providers::LockStore;
