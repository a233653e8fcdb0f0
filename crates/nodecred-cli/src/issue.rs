//! # Issue Subcommand
//!
//! Creates an HMAC-SHA256 credential for a node and prints it as a bearer
//! string or, with `--json`, in human-readable form.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;

use nodecred_codec::{encode, to_human_readable};
use nodecred_core::NodeId;
use nodecred_crypto::HmacSha256CredentialManager;

use crate::secret::SecretArgs;
use crate::time::{credential_issue_time, format_issue_time, parse_issue_time};

/// Arguments for the issue subcommand.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Node address to issue the credential for (hex, optional 0x prefix).
    #[arg(short = 'n', long)]
    pub node_id: String,

    /// Issue time, e.g. "Mon 02 Jan 2006 3:04:05 PM MST". Defaults to now.
    #[arg(short = 't', long)]
    pub time: Option<String>,

    /// Shared secret source.
    #[command(flatten)]
    pub secret: SecretArgs,

    /// Print the credential as human-readable JSON.
    #[arg(short = 'j', long)]
    pub json: bool,
}

/// Execute the issue subcommand.
pub fn run_issue(args: &IssueArgs) -> Result<u8> {
    println!("{}", issue(args)?);
    Ok(0)
}

/// Issue a credential and render it for output.
pub fn issue(args: &IssueArgs) -> Result<String> {
    let node_id = NodeId::from_hex(&args.node_id)
        .with_context(|| format!("invalid node id {:?}", args.node_id))?;

    let timestamp = match &args.time {
        Some(text) => parse_issue_time(text)?,
        None => {
            let now = Utc::now();
            tracing::info!(time = %format_issue_time(now), "no --time given; using now");
            now.timestamp()
        }
    };

    let secret = args.secret.load()?;
    let manager = HmacSha256CredentialManager::new(secret.as_slice());
    let credential = manager
        .create_for(timestamp, node_id)
        .context("failed to create credential")?;
    tracing::debug!(
        node_id = %credential.node_id(),
        issued_at = ?credential_issue_time(credential.credential()),
        "credential issued"
    );

    let rendered = if args.json {
        to_human_readable(&credential).to_json_pretty()?
    } else {
        encode(&credential)?
    };
    Ok(rendered)
}
