//! # Credential Manager
//!
//! Issues and verifies [`AuthenticatedCredential`]s with a keyed MAC.
//!
//! ## Security Invariant
//!
//! - The MAC input is always `CanonicalBytes::new(credential)`; there is no
//!   entry point that authenticates caller-supplied bytes.
//! - Verification compares tags with `subtle::ConstantTimeEq`, so response
//!   timing does not reveal how many leading tag bytes were correct.
//! - The key is never logged. Only node ids and timestamps appear in traces.
//!
//! ## Concurrency
//!
//! A `CredentialManager` is `Send + Sync` whenever its MAC type is `Send`,
//! and is meant to be shared by reference or `Arc` across threads. Each call
//! is independent; see [`crate::pool`] for how keyed state is isolated.

use hmac::digest::{FixedOutputReset, KeyInit};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use nodecred_core::{AuthenticatedCredential, CanonicalBytes, Credential, CredentialError, NodeId};

use crate::pool::{MacPool, MacStrategy};

/// Credential manager using HMAC-SHA256 (32-byte MACs).
pub type HmacSha256CredentialManager = CredentialManager<Hmac<Sha256>>;

/// Credential manager using HMAC-SHA1 (20-byte MACs).
pub type HmacSha1CredentialManager = CredentialManager<Hmac<Sha1>>;

/// Creates and verifies authenticated credentials under a single key.
///
/// The MAC type parameter selects the algorithm, e.g. `Hmac<Sha256>`.
pub struct CredentialManager<M> {
    pool: MacPool<M>,
}

impl<M> CredentialManager<M>
where
    M: Mac + KeyInit + FixedOutputReset,
{
    /// Create a manager with the default pooled strategy.
    pub fn new(key: impl AsRef<[u8]>) -> Self {
        Self::with_strategy(key, MacStrategy::default())
    }

    /// Create a manager with an explicit instance strategy. The strategy
    /// affects performance only; MACs are identical either way.
    pub fn with_strategy(key: impl AsRef<[u8]>, strategy: MacStrategy) -> Self {
        Self {
            pool: MacPool::new(key.as_ref(), strategy),
        }
    }

    /// Instance strategy of the underlying pool.
    pub fn strategy(&self) -> MacStrategy {
        self.pool.strategy()
    }

    /// Create an authenticated credential for `node_id` at `timestamp`
    /// (Unix seconds).
    ///
    /// # Errors
    ///
    /// - `CredentialError::InvalidIdentifierLength` unless `node_id` is
    ///   exactly 20 bytes.
    /// - `CredentialError::Serialization` if canonical encoding fails.
    /// - `CredentialError::KeySetup` if the MAC algorithm rejects the key.
    pub fn create(
        &self,
        timestamp: i64,
        node_id: &[u8],
    ) -> Result<AuthenticatedCredential, CredentialError> {
        let credential = Credential::from_slice(node_id, timestamp)?;
        self.authenticate(credential)
    }

    /// Typed variant of [`create`](Self::create).
    pub fn create_for(
        &self,
        timestamp: i64,
        node_id: NodeId,
    ) -> Result<AuthenticatedCredential, CredentialError> {
        self.authenticate(Credential::new(node_id, timestamp))
    }

    /// Compute the MAC for an already-built credential.
    pub fn authenticate(
        &self,
        credential: Credential,
    ) -> Result<AuthenticatedCredential, CredentialError> {
        let mac = self.compute_mac(&credential)?;
        tracing::debug!(
            node_id = %credential.node_id(),
            timestamp = credential.timestamp(),
            "issued credential"
        );
        Ok(AuthenticatedCredential::new(credential, mac))
    }

    /// Check that `credential` carries the MAC this manager would compute.
    ///
    /// The identifier is not re-validated; a constructed credential always
    /// holds 20 bytes.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::MacMismatch` if the MAC does not match.
    pub fn verify(&self, credential: &AuthenticatedCredential) -> Result<(), CredentialError> {
        let expected = self.compute_mac(credential.credential())?;
        if !bool::from(expected.as_slice().ct_eq(credential.mac())) {
            tracing::warn!(
                node_id = %credential.node_id(),
                timestamp = credential.timestamp(),
                "credential MAC mismatch"
            );
            return Err(CredentialError::MacMismatch);
        }
        tracing::trace!(node_id = %credential.node_id(), "credential verified");
        Ok(())
    }

    fn compute_mac(&self, credential: &Credential) -> Result<Vec<u8>, CredentialError> {
        let bytes = CanonicalBytes::new(credential)?;
        self.pool.tag(&bytes)
    }
}

impl<M> std::fmt::Debug for CredentialManager<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialManager")
            .field("pool", &self.pool)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NODE: [u8; 20] = [
        0x12, 0x34, 0x56, 0x78, 0x90, 0x12, 0x34, 0x56, 0x78, 0x90, 0x12, 0x34, 0x56, 0x78, 0x90,
        0x12, 0x34, 0x56, 0x78, 0x90,
    ];

    fn assert_resettable<M: Mac + KeyInit + FixedOutputReset>() {}

    #[test]
    fn hmac_types_satisfy_engine_bounds() {
        assert_resettable::<Hmac<Sha256>>();
        assert_resettable::<Hmac<Sha1>>();
        let cm = HmacSha1CredentialManager::new(b"");
        assert!(cm.create(0, &[0; 20]).is_ok());
    }

    #[test]
    fn known_answer_hmac_sha256() {
        // HMAC-SHA256("test-secret", canonical(0x12 * 20, 1700000000)).
        let cm = HmacSha256CredentialManager::new("test-secret");
        let cred = cm.create(1_700_000_000, &[0x12; 20]).unwrap();
        assert_eq!(
            cred.mac(),
            [
                0xd2, 0x35, 0x0b, 0xed, 0xed, 0xbc, 0xa0, 0x2c, 0xa2, 0x8f, 0x12, 0x3e, 0x3c, 0xfc,
                0x92, 0xf9, 0xc4, 0x5f, 0x3e, 0x23, 0x1d, 0xc5, 0x9b, 0xf5, 0x02, 0xb7, 0x6d, 0x3a,
                0x59, 0x0d, 0xc6, 0x21,
            ]
        );
    }

    #[test]
    fn mac_length_follows_algorithm() {
        let sha1 = HmacSha1CredentialManager::new("k");
        let sha256 = HmacSha256CredentialManager::new("k");
        assert_eq!(sha1.create(1, &NODE).unwrap().mac().len(), 20);
        assert_eq!(sha256.create(1, &NODE).unwrap().mac().len(), 32);
    }

    #[test]
    fn create_rejects_bad_lengths() {
        let cm = HmacSha1CredentialManager::new("Curiouser and curiouser");
        for len in [0usize, 19, 21] {
            let err = cm.create(1, &vec![0xab; len]).unwrap_err();
            assert!(
                matches!(err, CredentialError::InvalidIdentifierLength { actual, .. } if actual == len),
                "unexpected error for length {len}: {err:?}"
            );
        }
        assert!(cm.create(1, &[0xab; 20]).is_ok());
    }

    #[test]
    fn verify_accepts_own_credential() {
        let cm = HmacSha1CredentialManager::new("Curiouser and curiouser");
        let cred = cm.create(1_700_000_000, &NODE).unwrap();
        cm.verify(&cred).unwrap();
    }

    #[test]
    fn create_for_matches_create() {
        let cm = HmacSha256CredentialManager::new("k");
        let a = cm.create(42, &NODE).unwrap();
        let b = cm.create_for(42, NodeId::from_bytes(NODE)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn truncated_mac_rejected() {
        let cm = HmacSha256CredentialManager::new("k");
        let mut cred = cm.create(42, &NODE).unwrap();
        let mut mac = cred.mac().to_vec();
        mac.truncate(16);
        cred.set_mac(mac);
        assert!(matches!(cm.verify(&cred), Err(CredentialError::MacMismatch)));
    }

    #[test]
    fn empty_mac_rejected() {
        let cm = HmacSha256CredentialManager::new("k");
        let mut cred = cm.create(42, &NODE).unwrap();
        cred.set_mac(Vec::new());
        assert!(matches!(cm.verify(&cred), Err(CredentialError::MacMismatch)));
    }

    #[test]
    fn timestamp_is_authenticated() {
        let cm = HmacSha256CredentialManager::new("k");
        let cred = cm.create(42, &NODE).unwrap();
        let (credential, mac) = cred.into_parts();
        let forged = AuthenticatedCredential::new(
            Credential::new(*credential.node_id(), credential.timestamp() + 1),
            mac,
        );
        assert!(matches!(cm.verify(&forged), Err(CredentialError::MacMismatch)));
    }

    #[test]
    fn empty_key_is_usable() {
        let cm = HmacSha256CredentialManager::new(b"");
        let cred = cm.create(0, &NODE).unwrap();
        cm.verify(&cred).unwrap();
    }

    #[test]
    fn strategies_agree() {
        let pooled = HmacSha256CredentialManager::new("same key");
        let fresh = HmacSha256CredentialManager::with_strategy("same key", MacStrategy::Fresh);
        assert_eq!(pooled.strategy(), MacStrategy::default());
        assert_eq!(fresh.strategy(), MacStrategy::Fresh);
        for ts in [-5, 0, 1, 1_700_000_000, i64::MAX] {
            let a = pooled.create(ts, &NODE).unwrap();
            let b = fresh.create(ts, &NODE).unwrap();
            assert_eq!(a.mac(), b.mac());
            fresh.verify(&a).unwrap();
            pooled.verify(&b).unwrap();
        }
    }

    #[test]
    fn debug_does_not_leak_key() {
        let cm = HmacSha256CredentialManager::new("Off with their heads!");
        assert!(!format!("{cm:?}").contains("Off with their heads!"));
    }
}
