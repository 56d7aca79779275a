//! Value objects
//!
//! Immutable values that flow between the lock manager and the store.

/// Lock token and expiry codec
pub mod token;

pub use token::LockToken;
