//! In-memory lock store tests

use rdlock_domain::{LockStore, LockToken, ManualClock};
use rdlock_providers::InMemoryLockStore;
use std::sync::Arc;
use std::time::Duration;

const LEASE: Duration = Duration::from_secs(5);

fn store_at(now_ms: i64) -> (InMemoryLockStore, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(now_ms));
    (InMemoryLockStore::with_clock(clock.clone()), clock)
}

#[tokio::test]
async fn test_create_if_absent_only_once() {
    let (store, _clock) = store_at(0);
    let first = LockToken::issue(5_000);
    let second = LockToken::issue(5_000);

    assert!(store.create_if_absent("job", &first, LEASE).await.unwrap());
    assert!(!store.create_if_absent("job", &second, LEASE).await.unwrap());
    assert_eq!(store.read("job").await.unwrap(), Some(first));
}

#[tokio::test]
async fn test_store_ttl_expires_entry() {
    let (store, clock) = store_at(0);
    let token = LockToken::issue(5_000);
    store.create_if_absent("job", &token, LEASE).await.unwrap();

    clock.advance(Duration::from_millis(4_999));
    assert!(store.read("job").await.unwrap().is_some());
    assert_eq!(store.ttl("job"), Some(Duration::from_millis(1)));

    clock.advance(Duration::from_millis(1));
    assert!(store.read("job").await.unwrap().is_none());
    assert!(store.is_empty());

    let next = LockToken::issue(10_000);
    assert!(store.create_if_absent("job", &next, LEASE).await.unwrap());
}

#[tokio::test]
async fn test_steal_requires_expired_expected_token() {
    let (store, _clock) = store_at(0);
    // Store TTL outlives the embedded expiry
    let old = LockToken::issue(1_000);
    store
        .create_if_absent("job", &old, Duration::from_secs(60))
        .await
        .unwrap();
    let new = LockToken::issue(11_000);

    // Not yet expired relative to the caller's clock
    assert!(!store.steal_if_expired("job", &old, &new, 1_000, LEASE).await.unwrap());
    // Expected token does not match the stored one
    let other = LockToken::issue(1_000);
    assert!(!store.steal_if_expired("job", &other, &new, 2_000, LEASE).await.unwrap());
    assert_eq!(store.read("job").await.unwrap(), Some(old.clone()));

    assert!(store.steal_if_expired("job", &old, &new, 2_000, LEASE).await.unwrap());
    assert_eq!(store.read("job").await.unwrap(), Some(new));
    assert_eq!(store.ttl("job"), Some(LEASE));
}

#[tokio::test]
async fn test_steal_creates_when_entry_vanished() {
    let (store, _clock) = store_at(0);
    let old = LockToken::issue(1_000);
    let new = LockToken::issue(6_000);

    assert!(store.steal_if_expired("job", &old, &new, 2_000, LEASE).await.unwrap());
    assert_eq!(store.read("job").await.unwrap(), Some(new));
}

#[tokio::test]
async fn test_steal_never_replaces_undecodable_value() {
    let (store, _clock) = store_at(0);
    let foreign = LockToken::from_raw("held-by-legacy-client");
    store.create_if_absent("job", &foreign, LEASE).await.unwrap();
    let new = LockToken::issue(6_000);

    assert!(!store.steal_if_expired("job", &foreign, &new, i64::MAX, LEASE).await.unwrap());
    assert_eq!(store.read("job").await.unwrap(), Some(foreign));
}

#[tokio::test]
async fn test_concurrent_steal_has_single_winner() {
    let (store, _clock) = store_at(0);
    let old = LockToken::issue(1_000);
    store
        .create_if_absent("job", &old, Duration::from_secs(60))
        .await
        .unwrap();

    let attempts = (0..16).map(|_| {
        let store = store.clone();
        let old = old.clone();
        tokio::spawn(async move {
            let new = LockToken::issue(10_000);
            store.steal_if_expired("job", &old, &new, 5_000, LEASE).await.unwrap()
        })
    });
    let results = futures::future::join_all(attempts).await;
    let winners = results.into_iter().filter(|r| *r.as_ref().unwrap()).count();

    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_compare_and_delete() {
    let (store, _clock) = store_at(0);
    let token = LockToken::issue(5_000);
    store.create_if_absent("job", &token, LEASE).await.unwrap();

    let stranger = LockToken::issue(5_000);
    assert!(!store.compare_and_delete("job", &stranger).await.unwrap());
    assert_eq!(store.read("job").await.unwrap(), Some(token.clone()));

    assert!(store.compare_and_delete("job", &token).await.unwrap());
    assert!(store.read("job").await.unwrap().is_none());
    assert!(!store.compare_and_delete("job", &token).await.unwrap());
}

#[test]
fn test_provider_name() {
    assert_eq!(InMemoryLockStore::new().provider_name(), "memory");
}

#[tokio::test]
async fn test_dead_entries_are_swept() {
    let (store, clock) = store_at(0);
    for name in ["a", "b", "c"] {
        let token = LockToken::issue(5_000);
        assert!(store.create_if_absent(name, &token, LEASE).await.unwrap());
    }
    assert_eq!(store.stored_len(), 3);

    clock.advance(LEASE);

    // Reading or deleting a dead entry removes it
    assert!(store.read("a").await.unwrap().is_none());
    assert!(
        !store
            .compare_and_delete("b", &LockToken::issue(5_000))
            .await
            .unwrap()
    );
    assert_eq!(store.stored_len(), 1);

    assert_eq!(store.purge_expired(), 1);
    assert_eq!(store.stored_len(), 0);
    assert_eq!(store.purge_expired(), 0);
}
