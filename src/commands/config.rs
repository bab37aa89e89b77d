//! Config command - show and persist default build options.

use anyhow::Result;
use std::path::PathBuf;

use crate::config;
use crate::orchestrator::{BuildOptions, OutputMode};

/// Print the persisted build options (defaults if none saved yet).
pub fn cmd_config_show() -> Result<()> {
    let options = config::load_options()?;
    println!("Options file: {}", config::options_path().display());
    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}

/// Persist build options as defaults for future builds.
pub fn cmd_config_set(
    onedir: bool,
    icon: Option<PathBuf>,
    add_data: Option<String>,
    verbose: bool,
) -> Result<()> {
    let options = BuildOptions {
        output_mode: if onedir {
            OutputMode::Directory
        } else {
            OutputMode::SingleFile
        },
        icon_path: icon,
        extra_data: add_data,
        verbose,
    };
    config::save_options(&options)?;
    println!("Saved options to {}", config::options_path().display());
    Ok(())
}
