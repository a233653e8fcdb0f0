//! # Bearer String Codec
//!
//! Packs an [`AuthenticatedCredential`] into `username:password`, where
//!
//! - `username` is base64url of the 20 raw node id bytes, and
//! - `password` is base64url of the protobuf envelope
//!   `{ credential: { timestamp }, mac }` with the node id left empty.
//!
//! The node id already travels in the username, so it is dropped from the
//! payload to keep the string short and put back on decode. Encoding works
//! on a private copy of the envelope; the caller's credential is never
//! modified.
//!
//! Decoding does not verify the MAC. Callers must pass the result to
//! `CredentialManager::verify` before trusting it.

use prost::Message;

use nodecred_core::wire::{AuthenticatedCredentialMessage, CredentialMessage};
use nodecred_core::{AuthenticatedCredential, Credential, NodeId};

use crate::base64url;
use crate::error::CodecError;

/// Separator between the username and password halves.
pub const SEPARATOR: char = ':';

/// Base64url of the raw node id.
pub fn encode_username(credential: &AuthenticatedCredential) -> String {
    base64url::encode(credential.node_id().as_bytes())
}

/// Base64url of the envelope with the node id stripped.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if protobuf encoding fails.
pub fn encode_password(credential: &AuthenticatedCredential) -> Result<String, CodecError> {
    let envelope = AuthenticatedCredentialMessage {
        credential: Some(CredentialMessage {
            node_id: Vec::new(),
            timestamp: credential.timestamp(),
        }),
        mac: credential.mac().to_vec(),
    };
    let mut buf = Vec::with_capacity(envelope.encoded_len());
    envelope.encode(&mut buf)?;
    Ok(base64url::encode(buf))
}

/// Full bearer string, `username:password`.
pub fn encode(credential: &AuthenticatedCredential) -> Result<String, CodecError> {
    Ok(BearerCredential::from_credential(credential)?.to_string())
}

/// Parse a bearer string back into a credential. The MAC is not checked.
///
/// # Errors
///
/// - `CodecError::MalformedCredential` unless the input has exactly one `:`.
/// - `CodecError::Encoding` if either half is not base64url.
/// - `CodecError::Envelope` if the payload is not a credential envelope.
/// - `CodecError::Credential` if the username is not a 20-byte node id.
pub fn decode(bearer: &str) -> Result<AuthenticatedCredential, CodecError> {
    bearer.parse::<BearerCredential>()?.decode()
}

/// Decode the two halves of a bearer string received separately, e.g. as
/// HTTP basic-auth username and password.
pub fn decode_parts(username: &str, password: &str) -> Result<AuthenticatedCredential, CodecError> {
    let node_id = NodeId::from_slice(&base64url::decode("username", username)?)?;
    let payload = base64url::decode("password", password)?;

    let envelope = AuthenticatedCredentialMessage::decode(payload.as_slice())?;
    let inner = envelope
        .credential
        .ok_or_else(|| CodecError::Envelope("missing credential field".to_string()))?;
    if !inner.node_id.is_empty() {
        tracing::debug!(
            payload_len = inner.node_id.len(),
            "payload carried a node id; replacing it with the username"
        );
    }

    Ok(AuthenticatedCredential::new(
        Credential::new(node_id, inner.timestamp),
        envelope.mac,
    ))
}

/// The two encoded halves of a bearer string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerCredential {
    /// base64url of the node id.
    pub username: String,
    /// base64url of the envelope with the node id cleared.
    pub password: String,
}

impl BearerCredential {
    /// Encode both halves of `credential`.
    pub fn from_credential(credential: &AuthenticatedCredential) -> Result<Self, CodecError> {
        Ok(Self {
            username: encode_username(credential),
            password: encode_password(credential)?,
        })
    }

    /// Decode into a credential. The MAC is not checked.
    pub fn decode(&self) -> Result<AuthenticatedCredential, CodecError> {
        decode_parts(&self.username, &self.password)
    }
}

impl std::str::FromStr for BearerCredential {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(SEPARATOR).collect();
        match parts.as_slice() {
            [username, password] => Ok(Self {
                username: (*username).to_string(),
                password: (*password).to_string(),
            }),
            _ => Err(CodecError::MalformedCredential { parts: parts.len() }),
        }
    }
}

impl std::fmt::Display for BearerCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.username, self.password)
    }
}
