//! # Codec Error Types
//!
//! Errors from packing and unpacking credentials. Every failure is reported
//! explicitly; no decoder substitutes an empty or zeroed identifier.

use thiserror::Error;

use nodecred_core::CredentialError;

/// Errors from the bearer-string and human-readable codecs.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The bearer string is not exactly `username:password`.
    #[error("malformed credential: expected 2 ':'-separated parts, got {parts}")]
    MalformedCredential {
        /// Number of parts the input split into.
        parts: usize,
    },

    /// A base64 field could not be decoded.
    #[error("invalid base64 in {field}: {source}")]
    Encoding {
        /// Which field failed (`username`, `password`, `mac`).
        field: &'static str,
        /// Underlying base64 error.
        #[source]
        source: base64::DecodeError,
    },

    /// The payload is not a valid credential envelope.
    #[error("invalid credential envelope: {0}")]
    Envelope(String),

    /// Protobuf encoding of the envelope failed.
    #[error("envelope encoding failed: {0}")]
    Serialization(#[from] prost::EncodeError),

    /// The identifier or another credential field is invalid.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// Human-readable JSON could not be produced or parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<prost::DecodeError> for CodecError {
    fn from(e: prost::DecodeError) -> Self {
        Self::Envelope(e.to_string())
    }
}
