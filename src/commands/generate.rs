//! Generate command implementation
//!
//! The generate command runs the full pipeline:
//! 1. Sync every configured source repository (clone or pull)
//! 2. Extract enum and class declarations from the configured C# files
//! 3. Write the assembled intellisense document, truncating the old one
//!
//! Generation is unconditional; there is no diffing against the previous
//! output and no incremental mode.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use lua_stubgen::config::{self, Config};
use lua_stubgen::generate::Generator;
use lua_stubgen::git;
use lua_stubgen::output::{emoji, OutputConfig};

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to config file (built-in Quaver/ImGui configuration when omitted)
    #[arg(short, long, value_name = "PATH", env = "LUA_STUBGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output file (overrides the configured path)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Skip repository sync and regenerate from existing checkouts
    #[arg(long)]
    pub no_sync: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the generate command
pub fn execute(args: GenerateArgs, output: &OutputConfig) -> Result<()> {
    let start_time = Instant::now();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(path) = args.output {
        config.output = path;
    }

    if !args.quiet {
        println!(
            "{} Regenerating {}",
            emoji(output, "📝", "[GEN]"),
            config.output.display()
        );
    }

    if !args.no_sync {
        sync_repositories(&config)?;
    }

    let generator = Generator::new(&config)?;
    generator.write_document()?;

    if !args.quiet {
        println!(
            "{} Written {} in {:.2?}",
            emoji(output, "✅", "[OK]"),
            config.output.display(),
            start_time.elapsed()
        );
    }

    Ok(())
}

/// Load configuration, falling back to the built-in descriptor lists when
/// no file was given and none exists in the working directory.
pub fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Configuration file not found: {}", path.display());
            }
            Ok(config::from_file(path)?)
        }
        None => {
            let default_path = std::path::Path::new("stubgen.yaml");
            if default_path.exists() {
                Ok(config::from_file(default_path)?)
            } else {
                Ok(Config::default())
            }
        }
    }
}

/// Sync every configured repository, in order, stopping at the first fault.
pub fn sync_repositories(config: &Config) -> Result<()> {
    for repository in &config.repositories {
        git::sync(&repository.dir, &repository.url)?;
    }
    Ok(())
}
