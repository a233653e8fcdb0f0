//! # nodecred-codec — Transport Codec
//!
//! Converts [`AuthenticatedCredential`] values to and from their transport
//! forms:
//!
//! - the bearer string `base64url(node_id):base64url(envelope)` ([`bearer`]),
//! - the human-readable JSON record ([`human`]).
//!
//! Decoding never verifies a MAC. Decode and verify are separate steps so
//! a relying party always makes the verification call explicitly.
//!
//! ## Crate Policy
//!
//! - Depends only on `nodecred-core` internally.
//! - Codec functions never mutate their input.
//!
//! [`AuthenticatedCredential`]: nodecred_core::AuthenticatedCredential

#![deny(missing_docs)]

mod base64url;
pub mod bearer;
pub mod error;
pub mod human;

pub use bearer::{decode, decode_parts, encode, encode_password, encode_username, BearerCredential};
pub use error::CodecError;
pub use human::{from_human_readable, to_human_readable, HumanReadableCredential};
