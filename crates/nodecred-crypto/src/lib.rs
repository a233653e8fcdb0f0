//! # nodecred-crypto — MAC Engine
//!
//! Issues and verifies node credentials with a keyed MAC:
//!
//! - [`CredentialManager`] creates an [`AuthenticatedCredential`] from a
//!   node id and timestamp, and verifies one in constant time.
//! - [`MacPool`] isolates the stateful keyed-hash instances shared across
//!   concurrent callers, resetting each before it is reused.
//!
//! ## Crate Policy
//!
//! - Depends only on `nodecred-core` internally.
//! - No mocking of cryptographic operations in tests; all tests use real
//!   HMAC-SHA1 / HMAC-SHA256.
//! - `unsafe` prohibited.
//!
//! [`AuthenticatedCredential`]: nodecred_core::AuthenticatedCredential

#![deny(missing_docs)]

pub mod engine;
pub mod pool;

pub use engine::{CredentialManager, HmacSha1CredentialManager, HmacSha256CredentialManager};
pub use pool::{MacPool, MacStrategy, DEFAULT_POOL_CAPACITY};
