//! Command implementations for the CLI

pub mod completions;
pub mod generate;
pub mod sync;

use lua_stubgen::output::OutputConfig;

/// Build the output configuration shared by all commands.
pub fn output_config(color_flag: &str) -> OutputConfig {
    OutputConfig::from_env_and_flag(color_flag)
}
