//! # Provider Implementations
//!
//! Concrete [`LockStore`](rdlock_domain::LockStore) backends. Each provider
//! registers itself into the application layer's
//! [`LOCK_STORE_PROVIDERS`](rdlock_application::LOCK_STORE_PROVIDERS) slice.
//!
//! | Provider | Feature | Description |
//! |----------|---------|-------------|
//! | `redis` | `store-redis` | Redis, `SET NX PX` plus Lua scripts |
//! | `memory` | `store-memory` | Single-process store with the same atomic contract |

pub mod constants;
pub mod store;

#[cfg(feature = "store-memory")]
pub use store::InMemoryLockStore;
#[cfg(feature = "store-redis")]
pub use store::RedisLockStore;
