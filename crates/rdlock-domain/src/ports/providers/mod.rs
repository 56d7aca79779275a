//! External Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | LockStore | Shared key-value store offering the four atomic lock primitives |

/// Lock store provider port
pub mod lock_store;

pub use lock_store::LockStore;
