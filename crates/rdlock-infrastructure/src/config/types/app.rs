//! Main application configuration

use super::{LockConfig, LoggingConfig, StoreConfig};
use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Lease settings
    pub lock: LockConfig,
    /// Backing store
    pub store: StoreConfig,
    /// Logging
    pub logging: LoggingConfig,
}
