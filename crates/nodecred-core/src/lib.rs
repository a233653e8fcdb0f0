//! # nodecred-core — Foundational Types for Node Credentials
//!
//! Defines the values every other crate in the workspace exchanges: the
//! 20-byte [`NodeId`], the [`Credential`] it is bound into, the
//! [`AuthenticatedCredential`] that carries a MAC, and the
//! [`CanonicalBytes`] a MAC is computed over.
//!
//! ## Key Design Principles
//!
//! 1. **Fixed-length identifiers.** `NodeId` wraps `[u8; 20]`. A credential
//!    for any other length cannot be represented.
//!
//! 2. **`CanonicalBytes` newtype.** ALL MAC computation flows through
//!    `CanonicalBytes::new()`. Issuing and verifying share one encoder by
//!    construction.
//!
//! 3. **Domain types separate from wire types.** The protobuf messages in
//!    [`wire`] are transport representations; codecs convert explicitly.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `nodecred-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

#![deny(missing_docs)]

pub mod canonical;
pub mod credential;
pub mod error;
pub mod node_id;
pub mod wire;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use credential::{AuthenticatedCredential, Credential};
pub use error::{CanonicalizationError, CredentialError};
pub use node_id::{NodeId, NODE_ID_LEN};
