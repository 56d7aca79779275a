//! Lock store providers

#[cfg(feature = "store-memory")]
pub mod memory;
#[cfg(feature = "store-redis")]
pub mod redis;
#[cfg(feature = "store-redis")]
pub mod scripts;

#[cfg(feature = "store-memory")]
pub use memory::InMemoryLockStore;
#[cfg(feature = "store-redis")]
pub use self::redis::RedisLockStore;
