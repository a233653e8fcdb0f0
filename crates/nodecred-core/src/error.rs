//! # Error Types
//!
//! Errors raised while building, serializing, and authenticating node
//! credentials. All errors use `thiserror` for derive-based `Display` and
//! `Error` implementations.
//!
//! ## Design
//!
//! - Input validation errors (`InvalidIdentifierLength`, `InvalidHex`) are
//!   recoverable by the caller correcting its input.
//! - `MacMismatch` is an expected rejection, not a fault. Callers treat it as
//!   "reject this credential" and never retry.
//! - `Serialization` indicates a programming error: a well-formed in-memory
//!   credential always encodes.

use thiserror::Error;

use crate::node_id::NODE_ID_LEN;

/// Top-level error type for credential operations.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The node identifier is not exactly [`NODE_ID_LEN`] bytes.
    #[error("invalid node id length: expected {expected} bytes, got {actual}")]
    InvalidIdentifierLength {
        /// Required length.
        expected: usize,
        /// Length supplied by the caller.
        actual: usize,
    },

    /// The node identifier is not valid hex.
    #[error("invalid node id hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Canonical encoding of the credential failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] CanonicalizationError),

    /// The recomputed MAC does not match the one carried by the credential.
    #[error("credential MAC mismatch")]
    MacMismatch,

    /// The MAC algorithm refused the configured key.
    #[error("could not key MAC instance: {0}")]
    KeySetup(String),
}

impl CredentialError {
    /// Build the length error for an identifier of `actual` bytes.
    pub fn invalid_length(actual: usize) -> Self {
        Self::InvalidIdentifierLength {
            expected: NODE_ID_LEN,
            actual,
        }
    }
}

/// Error during canonical serialization of a credential.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Protobuf encoding failed.
    #[error("protobuf encoding failed: {0}")]
    Encode(#[from] prost::EncodeError),
}
