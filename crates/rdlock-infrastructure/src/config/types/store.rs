//! Store configuration types

use crate::constants::DEFAULT_STORE_PROVIDER;
use serde::{Deserialize, Serialize};

/// Lock store configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Registered provider name ("redis", "memory")
    pub provider: String,

    /// Connection URI (Redis provider); the provider default applies when unset
    pub uri: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_STORE_PROVIDER.to_string(),
            uri: None,
        }
    }
}
