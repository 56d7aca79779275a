//! Infrastructure layer constants
//!
//! Protocol constants are defined in `rdlock_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "rdlock.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "rdlock";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "RDLOCK";

/// Separator for nested keys in environment variables (`RDLOCK__LOCK__LEASE_DURATION_SECS`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// STORE CONSTANTS
// ============================================================================

/// Default lock store provider
pub const DEFAULT_STORE_PROVIDER: &str = "redis";

/// URI schemes accepted for the Redis provider
pub const REDIS_URI_SCHEMES: &[&str] = &["redis://", "rediss://", "redis+unix://", "unix://"];

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "RDLOCK_LOG";

/// File name prefix used when the configured log path has none
pub const DEFAULT_LOG_FILE_PREFIX: &str = "rdlock";
