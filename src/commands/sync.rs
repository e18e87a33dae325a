//! Sync command implementation
//!
//! Ensures every configured source repository is present and up to date
//! without touching the generated output. Useful for warming checkouts
//! before repeated `generate --no-sync` runs.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use lua_stubgen::output::{emoji, OutputConfig};

use super::generate::{load_config, sync_repositories};

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to config file (built-in Quaver/ImGui configuration when omitted)
    #[arg(short, long, value_name = "PATH", env = "LUA_STUBGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the sync command
pub fn execute(args: SyncArgs, output: &OutputConfig) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    sync_repositories(&config)?;

    if !args.quiet {
        println!(
            "{} Synced {} repositories",
            emoji(output, "✅", "[OK]"),
            config.repositories.len()
        );
    }

    Ok(())
}
