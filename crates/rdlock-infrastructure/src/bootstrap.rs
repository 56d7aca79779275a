//! Bootstrap
//!
//! Resolves the configured lock store from the provider registry and builds
//! a [`LockManager`] on top of it.

use crate::config::{AppConfig, StoreConfig};
use rdlock_application::{LockManager, LockStoreProviderConfig, resolve_lock_store};
use rdlock_domain::LockStore;
use rdlock_domain::error::{Error, Result};
use std::sync::Arc;
use tracing::info;

/// Create the lock store named by `config`
pub fn build_lock_store(config: &StoreConfig) -> Result<Arc<dyn LockStore>> {
    let mut provider_config = LockStoreProviderConfig::new(&config.provider);
    if let Some(uri) = &config.uri {
        provider_config = provider_config.with_uri(uri);
    }
    resolve_lock_store(&provider_config).map_err(Error::config)
}

/// Create a lock manager from the full application configuration
pub fn build_lock_manager(config: &AppConfig) -> Result<LockManager> {
    let store = build_lock_store(&config.store)?;
    info!(
        store = store.provider_name(),
        lease_secs = config.lock.lease_duration_secs,
        "Lock manager ready"
    );
    LockManager::new(store, config.lock.lease())
}
