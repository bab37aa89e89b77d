//! Preflight command - checks the packaging tool is installed.

use anyhow::{bail, Result};
use std::path::Path;

use crate::config::OrchestratorConfig;
use crate::preflight::{self, ToolCheck};

/// Execute the preflight command.
pub fn cmd_preflight(base_dir: &Path, tool: Option<String>, strict: bool) -> Result<()> {
    let mut config = OrchestratorConfig::new(base_dir);
    if let Some(tool) = tool {
        config.tool = tool;
    }

    match preflight::check_tool(&config) {
        ToolCheck::Found { path } => {
            println!("[OK]   {} -> {}", config.tool, path.display());
            Ok(())
        }
        ToolCheck::Missing { tool } => {
            println!("[FAIL] {tool} not found in PATH");
            if strict {
                bail!("Preflight failed: {tool} is not installed");
            }
            Ok(())
        }
    }
}
