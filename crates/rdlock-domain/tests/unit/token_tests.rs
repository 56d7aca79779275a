//! Unit tests for the lock token codec

use rdlock_domain::{Error, LockToken};
use std::time::Duration;

#[test]
fn test_issued_token_carries_expiry_and_owner() {
    let token = LockToken::issue(1_720_512_000_123);

    assert_eq!(token.expires_at_ms().unwrap(), 1_720_512_000_123);
    let owner = token.owner_id().expect("issued tokens have an owner id");
    assert_eq!(owner.len(), 32);
    assert!(token.as_str().starts_with("1720512000123:"));
}

#[test]
fn test_tokens_issued_in_same_millisecond_differ() {
    let first = LockToken::issue(5_000);
    let second = LockToken::issue(5_000);

    assert_ne!(first, second);
    assert_eq!(
        first.expires_at_ms().unwrap(),
        second.expires_at_ms().unwrap()
    );
}

#[test]
fn test_for_lease_adds_lease_to_now() {
    let token = LockToken::for_lease(10_000, Duration::from_secs(5));
    assert_eq!(token.expires_at_ms().unwrap(), 15_000);
}

#[test]
fn test_bare_millisecond_value_decodes() {
    let token = LockToken::from_raw("1531108800000");

    assert_eq!(token.expires_at_ms().unwrap(), 1_531_108_800_000);
    assert!(token.owner_id().is_none());
}

#[test]
fn test_undecodable_values_are_rejected() {
    for raw in ["", "abc", "-5", "12x", ":owner", "1.5:owner", "99999999999999999999"] {
        let token = LockToken::from_raw(raw);
        match token.expires_at_ms() {
            Err(Error::InvalidToken { token }) => assert_eq!(token, raw),
            other => panic!("Expected InvalidToken for {raw:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_expiry_is_strictly_before_now() {
    let token = LockToken::issue(1_000);

    assert!(!token.is_expired_at(999).unwrap());
    assert!(!token.is_expired_at(1_000).unwrap());
    assert!(token.is_expired_at(1_001).unwrap());
}

#[test]
fn test_remaining_lease() {
    let token = LockToken::issue(6_000);

    assert_eq!(token.remaining_at(1_000).unwrap(), Duration::from_secs(5));
    assert_eq!(token.remaining_at(7_000).unwrap(), Duration::ZERO);
}

#[test]
fn test_token_serializes_as_plain_string() {
    let token = LockToken::from_raw("42:abc");
    let json = serde_json::to_string(&token).unwrap();
    assert_eq!(json, "\"42:abc\"");

    let back: LockToken = serde_json::from_str(&json).unwrap();
    assert_eq!(back, token);
}
