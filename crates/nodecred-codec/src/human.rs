//! # Human-Readable Form
//!
//! A JSON-friendly view of an [`AuthenticatedCredential`]:
//!
//! ```json
//! {
//!     "node_id": "0x1234567890123456789012345678901234567890",
//!     "timestamp": 1700000000,
//!     "mac": "0jUL7e28oCyijxI-PPyS-cRfPiMdxZv1ArdtOlkNxiE="
//! }
//! ```
//!
//! `node_id` is `0x` plus lowercase hex; `mac` is padded base64url.

use serde::{Deserialize, Serialize};

use nodecred_core::{AuthenticatedCredential, Credential, NodeId};

use crate::base64url;
use crate::error::CodecError;

/// Human-readable credential record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanReadableCredential {
    /// `0x`-prefixed lowercase hex.
    pub node_id: String,
    /// Unix seconds.
    pub timestamp: i64,
    /// base64url of the MAC.
    pub mac: String,
}

impl HumanReadableCredential {
    /// Render as JSON indented with four spaces.
    pub fn to_json_pretty(&self) -> Result<String, CodecError> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(out).map_err(|e| CodecError::Json(serde::ser::Error::custom(e)))
    }

    /// Parse the JSON form. The node id is not validated until conversion.
    pub fn from_json(s: &str) -> Result<Self, CodecError> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Build the human-readable view of a credential.
pub fn to_human_readable(credential: &AuthenticatedCredential) -> HumanReadableCredential {
    HumanReadableCredential {
        node_id: credential.node_id().to_prefixed_hex(),
        timestamp: credential.timestamp(),
        mac: base64url::encode(credential.mac()),
    }
}

/// Parse a human-readable record. The `0x` prefix on `node_id` is optional.
///
/// # Errors
///
/// - `CodecError::Credential` if `node_id` is not 20 bytes of hex.
/// - `CodecError::Encoding` if `mac` is not base64url.
pub fn from_human_readable(
    record: &HumanReadableCredential,
) -> Result<AuthenticatedCredential, CodecError> {
    let node_id = NodeId::from_hex(&record.node_id)?;
    let mac = base64url::decode("mac", &record.mac)?;
    Ok(AuthenticatedCredential::new(
        Credential::new(node_id, record.timestamp),
        mac,
    ))
}

impl From<&AuthenticatedCredential> for HumanReadableCredential {
    fn from(credential: &AuthenticatedCredential) -> Self {
        to_human_readable(credential)
    }
}

impl TryFrom<&HumanReadableCredential> for AuthenticatedCredential {
    type Error = CodecError;

    fn try_from(record: &HumanReadableCredential) -> Result<Self, Self::Error> {
        from_human_readable(record)
    }
}
