//! Lock Store Provider Registry
//!
//! Auto-registration system for lock store providers.
//! Providers submit entries into [`LOCK_STORE_PROVIDERS`] with
//! `#[linkme::distributed_slice]` and are discovered at runtime.

use std::sync::Arc;

use rdlock_domain::LockStore;

/// Configuration for lock store provider creation
///
/// Providers without a network endpoint ignore `uri`.
#[derive(Debug, Clone, Default)]
pub struct LockStoreProviderConfig {
    /// Provider name (e.g., "redis", "memory")
    pub provider: String,
    /// Connection URI (for networked stores)
    pub uri: Option<String>,
}

impl LockStoreProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the URI
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }
}

/// Registry entry for lock store providers
///
/// The entry contains metadata and a factory function to create
/// provider instances.
pub struct LockStoreProviderEntry {
    /// Unique provider name (e.g., "redis", "memory")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create provider instance
    pub factory: fn(&LockStoreProviderConfig) -> Result<Arc<dyn LockStore>, String>,
}

#[linkme::distributed_slice]
pub static LOCK_STORE_PROVIDERS: [LockStoreProviderEntry] = [..];

/// Resolve lock store provider by name from registry
///
/// # Returns
/// * `Ok(Arc<dyn LockStore>)` - Created provider instance
/// * `Err(String)` - Error message if provider not found or creation failed
pub fn resolve_lock_store(
    config: &LockStoreProviderConfig,
) -> Result<Arc<dyn LockStore>, String> {
    let provider_name = &config.provider;

    if let Some(entry) = LOCK_STORE_PROVIDERS
        .iter()
        .find(|entry| entry.name == provider_name)
    {
        return (entry.factory)(config);
    }

    let available: Vec<&str> = LOCK_STORE_PROVIDERS.iter().map(|e| e.name).collect();
    Err(format!(
        "Unknown lock store provider '{provider_name}'. Available providers: {available:?}"
    ))
}

/// List all registered lock store providers
///
/// Returns a list of (name, description) tuples, sorted by name.
pub fn list_lock_store_providers() -> Vec<(&'static str, &'static str)> {
    let mut providers: Vec<(&'static str, &'static str)> = LOCK_STORE_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect();
    providers.sort_unstable_by_key(|(name, _)| *name);
    providers
}
