//! Use cases

/// Lock manager
pub mod lock_manager;

pub use lock_manager::LockManager;
