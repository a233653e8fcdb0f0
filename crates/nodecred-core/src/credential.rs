//! # Credentials
//!
//! `Credential` binds a [`NodeId`] to a Unix timestamp.
//! `AuthenticatedCredential` pairs a credential with the MAC an engine
//! computed over its canonical bytes.
//!
//! An `AuthenticatedCredential` carries no proof of validity by itself.
//! Validity is established only by verifying it against an engine holding
//! the issuing key.

use chrono::{DateTime, Utc};

use crate::error::CredentialError;
use crate::node_id::NodeId;

/// A node id vouched for at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Credential {
    node_id: NodeId,
    timestamp: i64,
}

impl Credential {
    /// Create a credential. Any timestamp is accepted; freshness is a
    /// relying-party policy.
    pub fn new(node_id: NodeId, timestamp: i64) -> Self {
        Self { node_id, timestamp }
    }

    /// Create a credential from an unchecked byte slice.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::InvalidIdentifierLength` unless `node_id`
    /// is exactly 20 bytes.
    pub fn from_slice(node_id: &[u8], timestamp: i64) -> Result<Self, CredentialError> {
        Ok(Self::new(NodeId::from_slice(node_id)?, timestamp))
    }

    /// The node this credential names.
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Unix seconds.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The timestamp as a UTC datetime, or `None` if it is outside the range
    /// chrono can represent.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// A credential together with its MAC.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthenticatedCredential {
    credential: Credential,
    mac: Vec<u8>,
}

impl AuthenticatedCredential {
    /// Pair a credential with a MAC. The MAC is not checked here.
    pub fn new(credential: Credential, mac: Vec<u8>) -> Self {
        Self { credential, mac }
    }

    /// The authenticated credential.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Shorthand for `credential().node_id()`.
    pub fn node_id(&self) -> &NodeId {
        self.credential.node_id()
    }

    /// Shorthand for `credential().timestamp()`.
    pub fn timestamp(&self) -> i64 {
        self.credential.timestamp()
    }

    /// The MAC bytes. Length depends on the issuing algorithm.
    pub fn mac(&self) -> &[u8] {
        &self.mac
    }

    /// Replace the MAC, returning the previous one.
    pub fn set_mac(&mut self, mac: Vec<u8>) -> Vec<u8> {
        std::mem::replace(&mut self.mac, mac)
    }

    /// Consume into the credential and MAC.
    pub fn into_parts(self) -> (Credential, Vec<u8>) {
        (self.credential, self.mac)
    }
}

impl std::fmt::Debug for AuthenticatedCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedCredential")
            .field("node_id", &self.credential.node_id)
            .field("timestamp", &self.credential.timestamp)
            .field("mac_len", &self.mac.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_enforces_length() {
        assert!(Credential::from_slice(&[1; 20], 0).is_ok());
        assert!(Credential::from_slice(&[1; 19], 0).is_err());
        assert!(Credential::from_slice(&[1; 21], 0).is_err());
        assert!(Credential::from_slice(&[], 0).is_err());
    }

    #[test]
    fn negative_and_future_timestamps_accepted() {
        let past = Credential::from_slice(&[1; 20], -1).unwrap();
        let future = Credential::from_slice(&[1; 20], 32_503_680_000).unwrap();
        assert_eq!(past.timestamp(), -1);
        assert_eq!(future.timestamp(), 32_503_680_000);
    }

    #[test]
    fn issued_at_matches_epoch() {
        let c = Credential::from_slice(&[1; 20], 1_700_000_000).unwrap();
        let dt = c.issued_at().unwrap();
        assert_eq!(dt.to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn issued_at_out_of_range_is_none() {
        let c = Credential::from_slice(&[1; 20], i64::MAX).unwrap();
        assert!(c.issued_at().is_none());
    }

    #[test]
    fn set_mac_returns_previous() {
        let c = Credential::from_slice(&[1; 20], 10).unwrap();
        let mut ac = AuthenticatedCredential::new(c, vec![1, 2, 3]);
        let old = ac.set_mac(vec![4, 5]);
        assert_eq!(old, vec![1, 2, 3]);
        assert_eq!(ac.mac(), &[4, 5]);
    }

    #[test]
    fn debug_omits_mac_bytes() {
        let c = Credential::from_slice(&[1; 20], 10).unwrap();
        let ac = AuthenticatedCredential::new(c, vec![0xaa; 32]);
        let dbg = format!("{ac:?}");
        assert!(dbg.contains("mac_len: 32"));
        assert!(!dbg.contains("aaaa"));
    }
}
