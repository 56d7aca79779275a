//! # Domain Layer
//!
//! Core types for rdlock: the lock token, the atomic store contract and the
//! error model shared by every other crate in the workspace.
//!
//! ## Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | [`LockToken`] and its expiry encoding |
//! | [`ports`] | [`LockStore`] contract, [`DistributedLock`] and [`Clock`] ports |
//! | [`error`] | Domain [`Error`] and [`Result`] alias |
//! | [`constants`] | Defaults shared across layers |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{Clock, DistributedLock, LockStore, ManualClock, SystemClock};
pub use value_objects::LockToken;
