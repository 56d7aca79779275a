//! Application Layer - rdlock
//!
//! Implements the lock acquisition and release protocol on top of the
//! [`LockStore`](rdlock_domain::LockStore) contract.
//!
//! ## Use Cases
//!
//! - [`LockManager`]: single-shot `lock` / `release` against a shared store
//!
//! ## Ports
//!
//! - `ports::registry::*`: compile-time registry of lock store providers
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `rdlock-domain`: For the token codec, store contract and error model
//! - Pure Rust libraries for async, logging and registration

pub mod ports;
pub mod use_cases;

pub use ports::*;
pub use use_cases::*;
