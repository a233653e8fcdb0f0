//! # nodecred-cli — Node Credential Command-Line Interface
//!
//! Issues, parses, and verifies node credentials from the shell.
//!
//! ## Subcommands
//!
//! - `issue` — create a credential and print the bearer string or JSON
//! - `parse` — decode a bearer string into JSON without verifying it
//! - `verify` — decode a bearer string and check its MAC
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to the library crates and return their
//!   output as a `String` so they can be tested without capturing stdout.

#![deny(missing_docs)]

pub mod issue;
pub mod parse;
pub mod secret;
pub mod time;
pub mod verify;
