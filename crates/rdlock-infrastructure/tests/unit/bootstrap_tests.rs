//! Bootstrap Tests

use rdlock_domain::Error;
use rdlock_infrastructure::config::StoreConfig;
use rdlock_infrastructure::{ConfigBuilder, build_lock_manager, build_lock_store};
use std::time::Duration;

fn memory_store() -> StoreConfig {
    StoreConfig {
        provider: "memory".to_string(),
        uri: None,
    }
}

#[tokio::test]
async fn test_build_memory_lock_manager() {
    let config = ConfigBuilder::new()
        .with_lease_secs(5)
        .with_store(memory_store())
        .build();
    let manager = build_lock_manager(&config).unwrap();

    assert_eq!(manager.lease(), Duration::from_secs(5));
    assert!(manager.lock("deploy").await.unwrap());
    assert!(manager.try_lock("deploy").await.unwrap().is_none());
    assert!(manager.release("deploy").await.unwrap());
}

#[test]
fn test_build_redis_store_is_lazy() {
    let store = build_lock_store(&StoreConfig {
        provider: "redis".to_string(),
        uri: Some("redis://127.0.0.1:6379".to_string()),
    })
    .unwrap();
    assert_eq!(store.provider_name(), "redis");
}

#[test]
fn test_unknown_store_is_config_error() {
    let result = build_lock_store(&StoreConfig {
        provider: "consul".to_string(),
        uri: None,
    });
    assert!(matches!(result, Err(Error::Config { .. })));
}

#[test]
fn test_zero_lease_is_rejected() {
    let config = ConfigBuilder::new()
        .with_lease_secs(0)
        .with_store(memory_store())
        .build();
    assert!(build_lock_manager(&config).is_err());
}
