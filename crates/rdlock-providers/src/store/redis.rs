//! Redis lock store provider
//!
//! Lock entries are plain Redis strings:
//!
//! - create-if-absent is a single `SET name token NX PX ttl`
//! - steal-if-expired and compare-and-delete are Lua scripts
//!   (see [`scripts`](super::scripts)), executed atomically by the server
//! - TTLs are set in milliseconds so sub-second leases are honoured
//!
//! Connections go through a lazily created [`ConnectionManager`], which
//! multiplexes requests and reconnects after transport failures.
//!
//! ## Example
//!
//! ```ignore
//! use rdlock_providers::RedisLockStore;
//!
//! let store = RedisLockStore::new("redis://localhost:6379")?;
//! // Or with host/port
//! let store = RedisLockStore::with_host_port("localhost", 6379)?;
//! ```

use super::scripts::{COMPARE_AND_DELETE, STEAL_IF_EXPIRED};
use async_trait::async_trait;
use rdlock_domain::error::{Error, Result};
use rdlock_domain::{LockStore, LockToken};
use redis::aio::ConnectionManager;
use redis::{Client, RedisError, Script};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{trace, warn};

/// Redis lock store
///
/// Clones share the same underlying connection.
#[derive(Clone)]
pub struct RedisLockStore {
    client: Client,
    address: String,
    connection: Arc<OnceCell<ConnectionManager>>,
    steal_script: Script,
    delete_script: Script,
}

impl RedisLockStore {
    /// Create a new Redis lock store from a connection string
    ///
    /// # Arguments
    ///
    /// * `connection_string` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// No connection is opened until the first operation.
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| Error::Configuration {
            message: format!("Invalid Redis connection string: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            client,
            address: redact_address(connection_string),
            connection: Arc::new(OnceCell::new()),
            steal_script: Script::new(STEAL_IF_EXPIRED),
            delete_script: Script::new(COMPARE_AND_DELETE),
        })
    }

    /// Create a new Redis lock store with host and port
    pub fn with_host_port(host: &str, port: u16) -> Result<Self> {
        Self::new(&format!("redis://{host}:{port}"))
    }

    /// Get the shared connection, establishing it on first use
    async fn get_connection(&self) -> Result<ConnectionManager> {
        let connection = self
            .connection
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to connect to Redis");
                Error::store_unavailable_with_source(
                    format!("Failed to connect to Redis: {e}"),
                    e,
                )
            })?;
        Ok(connection.clone())
    }

    /// Get the Redis server address description
    pub fn server_address(&self) -> &str {
        &self.address
    }
}

/// Connection string without scheme or credentials
fn redact_address(connection_string: &str) -> String {
    let without_scheme = connection_string
        .split_once("://")
        .map_or(connection_string, |(_, rest)| rest);
    without_scheme
        .rsplit_once('@')
        .map_or(without_scheme, |(_, host)| host)
        .to_string()
}

/// Classify a Redis error as transport failure or command failure
fn map_redis_error(operation: &str, e: RedisError) -> Error {
    if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout()
    {
        Error::store_unavailable_with_source(format!("Redis {operation} failed: {e}"), e)
    } else {
        Error::store_operation_with_source(format!("Redis {operation} failed: {e}"), e)
    }
}

fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

#[async_trait]
impl LockStore for RedisLockStore {
    async fn read(&self, name: &str) -> Result<Option<LockToken>> {
        let mut conn = self.get_connection().await?;

        let value: Option<String> = redis::cmd("GET")
            .arg(name)
            .query_async(&mut conn)
            .await
            .map_err(|e| map_redis_error("GET", e))?;
        Ok(value.map(LockToken::from))
    }

    async fn create_if_absent(
        &self,
        name: &str,
        token: &LockToken,
        ttl: Duration,
    ) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        // Reply is "OK" when the key was set, nil when it already existed
        let reply: Option<String> = redis::cmd("SET")
            .arg(name)
            .arg(token.as_str())
            .arg("NX")
            .arg("PX")
            .arg(ttl_millis(ttl))
            .query_async(&mut conn)
            .await
            .map_err(|e| map_redis_error("SET NX", e))?;

        let created = reply.is_some();
        trace!(lock = name, created, "SET NX");
        Ok(created)
    }

    async fn steal_if_expired(
        &self,
        name: &str,
        expected_old: &LockToken,
        new_token: &LockToken,
        now_ms: i64,
        ttl: Duration,
    ) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        let replaced: i64 = self
            .steal_script
            .key(name)
            .arg(expected_old.as_str())
            .arg(new_token.as_str())
            .arg(now_ms)
            .arg(ttl_millis(ttl))
            .invoke_async(&mut conn)
            .await
            .map_err(|e| map_redis_error("steal script", e))?;

        trace!(lock = name, replaced, "steal script");
        Ok(replaced == 1)
    }

    async fn compare_and_delete(&self, name: &str, expected: &LockToken) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        let deleted: i64 = self
            .delete_script
            .key(name)
            .arg(expected.as_str())
            .invoke_async(&mut conn)
            .await
            .map_err(|e| map_redis_error("compare-and-delete script", e))?;

        trace!(lock = name, deleted, "compare-and-delete script");
        Ok(deleted > 0)
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisLockStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisLockStore")
            .field("server", &self.server_address())
            .field("connected", &self.connection.initialized())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use crate::constants::REDIS_DEFAULT_URI;
use rdlock_application::ports::registry::{
    LOCK_STORE_PROVIDERS, LockStoreProviderConfig, LockStoreProviderEntry,
};

/// Factory function for creating Redis lock store instances.
fn redis_store_factory(
    config: &LockStoreProviderConfig,
) -> std::result::Result<Arc<dyn LockStore>, String> {
    let uri = config.uri.as_deref().unwrap_or(REDIS_DEFAULT_URI);

    let store =
        RedisLockStore::new(uri).map_err(|e| format!("Failed to create Redis lock store: {e}"))?;

    Ok(Arc::new(store))
}

#[linkme::distributed_slice(LOCK_STORE_PROVIDERS)]
static REDIS_PROVIDER: LockStoreProviderEntry = LockStoreProviderEntry {
    name: "redis",
    description: "Redis lock store (SET NX PX + Lua scripts)",
    factory: redis_store_factory,
};
