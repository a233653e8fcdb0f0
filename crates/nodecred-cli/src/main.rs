//! # cred-cli entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Logs go to stderr so stdout carries only the credential output.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nodecred_cli::issue::{run_issue, IssueArgs};
use nodecred_cli::parse::{run_parse, ParseArgs};
use nodecred_cli::verify::{run_verify, VerifyArgs};

/// Node credential tool.
///
/// Issues HMAC-authenticated node credentials and inspects existing ones.
#[derive(Parser, Debug)]
#[command(name = "cred-cli", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Issue a credential for a node address.
    Issue(IssueArgs),

    /// Print a bearer string as human-readable JSON.
    Parse(ParseArgs),

    /// Check a bearer string against the shared secret.
    Verify(VerifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Issue(args) => run_issue(&args),
        Commands::Parse(args) => run_parse(&args),
        Commands::Verify(args) => run_verify(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
