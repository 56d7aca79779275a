//! Configuration management
//!
//! Sources are merged in this order (later sources override earlier):
//! 1. Defaults from [`AppConfig::default()`]
//! 2. TOML configuration file
//! 3. Environment variables (`RDLOCK__SECTION__KEY`)

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, LockConfig, LoggingConfig, StoreConfig};
