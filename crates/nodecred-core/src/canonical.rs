//! # Canonical Serialization — MAC Input Bytes
//!
//! This module defines `CanonicalBytes`, the sole construction path for the
//! bytes a MAC is computed over.
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is `CanonicalBytes::new(&Credential)`, and MAC computation
//! accepts only `&CanonicalBytes`. Issuing and verifying therefore cannot
//! drift onto different encodings: if they did, every verification would
//! silently fail.
//!
//! ## Encoding
//!
//! The protobuf wire form of [`CredentialMessage`]:
//!
//! 1. Field 1, `node_id`: the 20 raw identifier bytes, length-delimited.
//! 2. Field 2, `timestamp`: the Unix seconds as an `int64` varint.
//!
//! Fields are emitted in tag order. No normalization is applied to the
//! identifier, and the timestamp is never rendered as text.

use prost::Message;

use crate::credential::Credential;
use crate::error::CanonicalizationError;
use crate::wire::CredentialMessage;

/// Bytes produced exclusively by the canonical credential encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Encode a credential into its canonical MAC input.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::Encode` if protobuf encoding fails,
    /// which indicates a programming error.
    pub fn new(credential: &Credential) -> Result<Self, CanonicalizationError> {
        let msg = CredentialMessage::from(credential);
        let mut buf = Vec::with_capacity(msg.encoded_len());
        msg.encode(&mut buf)?;
        Ok(Self(buf))
    }

    /// Access the canonical bytes for MAC computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the encoding in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false in practice: the 20-byte identifier is always encoded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
