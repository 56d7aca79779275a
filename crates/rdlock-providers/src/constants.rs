//! Provider constants

/// Default Redis connection URI
pub const REDIS_DEFAULT_URI: &str = "redis://127.0.0.1:6379";
