//! # Credential Manager Behavior Tests
//!
//! Exercises a shared `CredentialManager` the way a relying party uses it:
//! many credentials, several keys, and concurrent callers on one engine.

use std::sync::Arc;

use nodecred_core::{AuthenticatedCredential, CredentialError, NodeId};
use nodecred_crypto::{
    HmacSha1CredentialManager, HmacSha256CredentialManager, MacStrategy,
};
use proptest::prelude::*;
use rand::Rng;

fn node(hex: &str) -> NodeId {
    NodeId::from_hex(hex).expect("valid test node id")
}

#[test]
fn stolen_mac_is_rejected_for_both_credentials() {
    let cm = HmacSha1CredentialManager::new("We're all mad here");
    let mut a = cm
        .create_for(1_700_000_000, node("1234567890123456789012345678901234567890"))
        .unwrap();
    let mut b = cm
        .create_for(1_700_000_000, node("2234567890123456789012345678901234567890"))
        .unwrap();

    let mac_a = a.set_mac(b.mac().to_vec());
    b.set_mac(mac_a);
    assert!(matches!(cm.verify(&a), Err(CredentialError::MacMismatch)));
    assert!(matches!(cm.verify(&b), Err(CredentialError::MacMismatch)));

    let mac_a = a.set_mac(b.mac().to_vec());
    b.set_mac(mac_a);
    cm.verify(&a).unwrap();
    cm.verify(&b).unwrap();
}

#[test]
fn credential_is_only_valid_for_its_key() {
    let cm = HmacSha1CredentialManager::new("T'was brillig");
    let other = HmacSha1CredentialManager::new("And the slithy toves did gyre");

    let cred = cm
        .create_for(1_700_000_000, node("1234567890123456789012345678901234567890"))
        .unwrap();
    assert!(matches!(other.verify(&cred), Err(CredentialError::MacMismatch)));
    cm.verify(&cred).unwrap();
}

#[test]
fn repeated_creates_are_identical() {
    let cm = HmacSha1CredentialManager::new("Off with their heads!");
    let id = node("1234567890123456789012345678901234567890");

    let first = cm.create_for(1_700_000_000, id).unwrap();
    let second = cm.create_for(1_700_000_000, id).unwrap();
    assert_eq!(first.mac(), second.mac());
    cm.verify(&first).unwrap();
    cm.verify(&second).unwrap();
}

#[test]
fn bit_flips_in_mac_are_detected() {
    let cm = HmacSha256CredentialManager::new("test-secret");
    let cred = cm.create(1_700_000_000, &[0x12; 20]).unwrap();
    assert_eq!(cred.mac().len(), 32);

    for byte in 0..cred.mac().len() {
        for bit in 0..8 {
            let mut tampered = cred.clone();
            let mut mac = tampered.mac().to_vec();
            mac[byte] ^= 1 << bit;
            tampered.set_mac(mac);
            assert!(
                cm.verify(&tampered).is_err(),
                "flip of byte {byte} bit {bit} went undetected"
            );
        }
    }
    cm.verify(&cred).unwrap();
}

fn hammer(cm: Arc<HmacSha256CredentialManager>, threads: usize, per_thread: usize) {
    let reference = HmacSha256CredentialManager::with_strategy("shared key", MacStrategy::Fresh);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let cm = Arc::clone(&cm);
                let reference = &reference;
                scope.spawn(move || {
                    let mut rng = rand::thread_rng();
                    let mut issued: Vec<AuthenticatedCredential> = Vec::with_capacity(per_thread);
                    for _ in 0..per_thread {
                        let id: [u8; 20] = rng.gen();
                        let ts: i64 = rng.gen();
                        let cred = cm.create(ts, &id).unwrap();
                        assert_eq!(cred.node_id().as_bytes(), &id);
                        assert_eq!(cred.timestamp(), ts);
                        assert_eq!(cred.mac(), reference.create(ts, &id).unwrap().mac());
                        cm.verify(&cred).unwrap();
                        issued.push(cred);
                    }
                    issued
                })
            })
            .collect();

        let all: Vec<AuthenticatedCredential> = handles
            .into_iter()
            .flat_map(|h| h.join().expect("worker panicked"))
            .collect();

        // Everything issued concurrently still verifies afterwards.
        for cred in &all {
            cm.verify(cred).unwrap();
        }
        assert_eq!(all.len(), threads * per_thread);
    });
}

#[test]
fn concurrent_pooled_calls_do_not_interfere() {
    let cm = Arc::new(HmacSha256CredentialManager::with_strategy(
        "shared key",
        MacStrategy::Pooled { capacity: 4 },
    ));
    hammer(cm, 16, 200);
}

#[test]
fn concurrent_fresh_calls_do_not_interfere() {
    let cm = Arc::new(HmacSha256CredentialManager::with_strategy(
        "shared key",
        MacStrategy::Fresh,
    ));
    hammer(cm, 8, 100);
}

proptest! {
    #[test]
    fn create_then_verify_succeeds(id in any::<[u8; 20]>(), ts in any::<i64>()) {
        let cm = HmacSha256CredentialManager::new("prop key");
        let cred = cm.create(ts, &id).unwrap();
        prop_assert_eq!(cred.node_id().as_bytes(), &id);
        prop_assert_eq!(cred.timestamp(), ts);
        prop_assert!(cm.verify(&cred).is_ok());
    }

    #[test]
    fn different_keys_disagree(
        id in any::<[u8; 20]>(),
        ts in any::<i64>(),
        a in "[a-z]{1,16}",
        b in "[a-z]{1,16}",
    ) {
        prop_assume!(a != b);
        let cm_a = HmacSha256CredentialManager::new(&a);
        let cm_b = HmacSha256CredentialManager::new(&b);
        let cred = cm_a.create(ts, &id).unwrap();
        prop_assert!(cm_b.verify(&cred).is_err());
    }

    #[test]
    fn wrong_length_always_rejected(len in 0usize..64) {
        prop_assume!(len != 20);
        let cm = HmacSha256CredentialManager::new("prop key");
        let is_length_error = matches!(
            cm.create(1, &vec![0u8; len]),
            Err(CredentialError::InvalidIdentifierLength { .. })
        );
        prop_assert!(is_length_error);
    }
}
