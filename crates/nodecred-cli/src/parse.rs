//! # Parse Subcommand
//!
//! Decodes a bearer string and prints it as human-readable JSON. The MAC is
//! not checked; use `verify` for that.

use anyhow::{Context, Result};
use clap::Args;

use nodecred_codec::{decode, to_human_readable};

/// Arguments for the parse subcommand.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Bearer string in `username:password` form.
    pub credential: String,
}

/// Execute the parse subcommand.
pub fn run_parse(args: &ParseArgs) -> Result<u8> {
    println!("{}", parse(args)?);
    Ok(0)
}

/// Decode a bearer string and render it as human-readable JSON.
pub fn parse(args: &ParseArgs) -> Result<String> {
    let credential = decode(args.credential.trim())
        .with_context(|| format!("invalid credential: {}", args.credential.trim()))?;
    Ok(to_human_readable(&credential).to_json_pretty()?)
}
