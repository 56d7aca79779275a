//! Provider Registry
//!
//! Providers register themselves into linkme distributed slices at compile
//! time; the infrastructure layer resolves them by name from configuration.

/// Lock store provider registry
pub mod lock_store;

pub use lock_store::{
    LOCK_STORE_PROVIDERS, LockStoreProviderConfig, LockStoreProviderEntry,
    list_lock_store_providers, resolve_lock_store,
};
