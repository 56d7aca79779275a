//! Domain layer constants
//!
//! Contains constants that are part of the locking protocol and are used by
//! the application layer. Infrastructure-specific constants remain in
//! `rdlock_infrastructure::constants`.

// ============================================================================
// LEASE CONSTANTS
// ============================================================================

/// Default lease duration in seconds
///
/// Governs both the store TTL of a lock entry and the expiry instant
/// embedded in its token.
pub const DEFAULT_LEASE_DURATION_SECS: u64 = 50;

// ============================================================================
// TOKEN CONSTANTS
// ============================================================================

/// Separator between the expiry instant and the owner id inside a token
pub const TOKEN_SEPARATOR: char = ':';
