//! # Protobuf Wire Messages
//!
//! Message definitions for the credential wire format. The schema lives in
//! `proto/credentials.proto`; these structs are its `prost` rendition and
//! must stay field-for-field identical to it, because both the canonical MAC
//! input and the bearer-string payload are encoded from them.
//!
//! These types are a transport representation only. Domain code works with
//! [`Credential`] and [`AuthenticatedCredential`]; conversions live here so
//! no other module needs to know the field tags.

use crate::credential::{AuthenticatedCredential, Credential};
use crate::error::CredentialError;
use crate::node_id::NodeId;

/// Wire form of [`Credential`].
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CredentialMessage {
    /// Raw node id. Empty inside a bearer-string payload.
    #[prost(bytes = "vec", tag = "1")]
    pub node_id: Vec<u8>,
    /// Unix seconds.
    #[prost(int64, tag = "2")]
    pub timestamp: i64,
}

/// Wire form of [`AuthenticatedCredential`].
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AuthenticatedCredentialMessage {
    /// The signed credential. Absent only in malformed input.
    #[prost(message, optional, tag = "1")]
    pub credential: Option<CredentialMessage>,
    /// MAC over the canonical bytes of `credential`.
    #[prost(bytes = "vec", tag = "2")]
    pub mac: Vec<u8>,
}

impl From<&Credential> for CredentialMessage {
    fn from(credential: &Credential) -> Self {
        Self {
            node_id: credential.node_id().as_bytes().to_vec(),
            timestamp: credential.timestamp(),
        }
    }
}

impl TryFrom<CredentialMessage> for Credential {
    type Error = CredentialError;

    fn try_from(msg: CredentialMessage) -> Result<Self, Self::Error> {
        let node_id = NodeId::from_slice(&msg.node_id)?;
        Ok(Credential::new(node_id, msg.timestamp))
    }
}

impl From<&AuthenticatedCredential> for AuthenticatedCredentialMessage {
    fn from(ac: &AuthenticatedCredential) -> Self {
        Self {
            credential: Some(CredentialMessage::from(ac.credential())),
            mac: ac.mac().to_vec(),
        }
    }
}
