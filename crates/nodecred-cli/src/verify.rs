//! # Verify Subcommand
//!
//! Decodes a bearer string and checks its MAC against the shared secret.
//! Timestamp freshness is not checked.

use anyhow::{Context, Result};
use clap::Args;

use nodecred_codec::decode;
use nodecred_crypto::HmacSha256CredentialManager;

use crate::secret::SecretArgs;
use crate::time::credential_issue_time;

/// Arguments for the verify subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Bearer string in `username:password` form.
    pub credential: String,

    /// Shared secret source.
    #[command(flatten)]
    pub secret: SecretArgs,
}

/// Execute the verify subcommand.
pub fn run_verify(args: &VerifyArgs) -> Result<u8> {
    println!("{}", verify(args)?);
    Ok(0)
}

/// Decode and verify a bearer string, returning `valid` on success.
pub fn verify(args: &VerifyArgs) -> Result<String> {
    let credential = decode(args.credential.trim()).context("invalid credential")?;
    let secret = args.secret.load()?;
    HmacSha256CredentialManager::new(secret.as_slice())
        .verify(&credential)
        .with_context(|| format!("credential for {} rejected", credential.node_id()))?;
    tracing::info!(
        node_id = %credential.node_id(),
        timestamp = credential.timestamp(),
        issued_at = ?credential_issue_time(credential.credential()),
        "credential verified"
    );
    Ok("valid".to_string())
}
