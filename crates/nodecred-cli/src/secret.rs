//! # Shared Secret Arguments
//!
//! The MAC key comes from `--secret`, the `NODECRED_SECRET` environment
//! variable, or `--secret-file`. A secret file wins over the other two.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use zeroize::Zeroizing;

/// Secret used when none is configured. Only suitable for testing.
pub const DEFAULT_SECRET: &str = "test-secret";

/// Where to read the shared secret from.
#[derive(Args, Debug, Clone)]
pub struct SecretArgs {
    /// Shared secret used to key the MAC.
    #[arg(
        short = 's',
        long,
        env = "NODECRED_SECRET",
        hide_env_values = true,
        default_value = DEFAULT_SECRET
    )]
    pub secret: String,

    /// Read the shared secret from a file. One trailing newline is ignored.
    #[arg(long)]
    pub secret_file: Option<PathBuf>,
}

impl SecretArgs {
    /// Resolve the configured secret.
    pub fn load(&self) -> Result<Zeroizing<Vec<u8>>> {
        match &self.secret_file {
            Some(path) => load_secret_file(path),
            None => {
                if self.secret == DEFAULT_SECRET {
                    tracing::warn!("using the default test secret");
                }
                Ok(Zeroizing::new(self.secret.as_bytes().to_vec()))
            }
        }
    }
}

/// Read a secret file, dropping one trailing `\n` or `\r\n`.
pub fn load_secret_file(path: &Path) -> Result<Zeroizing<Vec<u8>>> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("failed to read secret metadata from {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = metadata.permissions().mode();
        if mode & 0o077 != 0 {
            tracing::warn!(
                path = %path.display(),
                mode = %format!("{:04o}", mode & 0o777),
                "secret file is readable by group or others"
            );
        }
    }
    #[cfg(not(unix))]
    let _ = metadata;

    let mut bytes = Zeroizing::new(
        std::fs::read(path)
            .with_context(|| format!("failed to read secret from {}", path.display()))?,
    );
    if bytes.ends_with(b"\n") {
        bytes.pop();
        if bytes.ends_with(b"\r") {
            bytes.pop();
        }
    }
    Ok(bytes)
}
