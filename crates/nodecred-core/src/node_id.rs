//! # Node Identifier
//!
//! `NodeId` is the 20-byte account address a credential is issued for.
//!
//! ## Invariant
//!
//! A `NodeId` always holds exactly [`NODE_ID_LEN`] bytes. Construction from
//! a slice of any other length fails; input is never truncated or padded.
//!
//! ## Serde
//!
//! Serializes as `0x` followed by 40 lowercase hex characters. Deserializes
//! with or without the `0x` prefix.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CredentialError;

/// Length in bytes of a node identifier.
pub const NODE_ID_LEN: usize = 20;

/// A 20-byte node address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId([u8; NODE_ID_LEN]);

impl NodeId {
    /// Create a node id from raw bytes.
    pub fn from_bytes(bytes: [u8; NODE_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Create a node id from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::InvalidIdentifierLength` unless the slice
    /// is exactly 20 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CredentialError> {
        let arr: [u8; NODE_ID_LEN] = bytes
            .try_into()
            .map_err(|_| CredentialError::invalid_length(bytes.len()))?;
        Ok(Self(arr))
    }

    /// Parse a node id from hex, with or without a `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::InvalidHex` for non-hex input and
    /// `CredentialError::InvalidIdentifierLength` if the decoded value is
    /// not 20 bytes.
    pub fn from_hex(s: &str) -> Result<Self, CredentialError> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits)?;
        Self::from_slice(&bytes)
    }

    /// Return the raw bytes.
    pub fn as_bytes(&self) -> &[u8; NODE_ID_LEN] {
        &self.0
    }

    /// Render as lowercase hex without prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Render as `0x`-prefixed lowercase hex.
    pub fn to_prefixed_hex(&self) -> String {
        format!("0x{}", self.to_hex())
    }
}

impl AsRef<[u8]> for NodeId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for NodeId {
    type Error = CredentialError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

impl std::str::FromStr for NodeId {
    type Err = CredentialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl std::fmt::Debug for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.to_prefixed_hex())
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_prefixed_hex())
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_prefixed_hex())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
