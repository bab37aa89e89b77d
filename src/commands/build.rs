//! Build command - runs one build end to end.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{self, OrchestratorConfig};
use crate::orchestrator::{BuildRequest, BuildResult, Orchestrator, OutputMode};
use crate::preflight::{self, ToolCheck};

/// Arguments for the build command.
pub struct BuildArgs {
    pub base_dir: PathBuf,
    pub tool: Option<String>,
    pub script: PathBuf,
    pub onedir: bool,
    pub icon: Option<PathBuf>,
    pub add_data: Option<String>,
    pub verbose: bool,
    pub keep_workdirs: bool,
    pub timeout: Option<u64>,
}

/// Execute the build command.
///
/// Persisted options serve as defaults; CLI flags override them. The tool's
/// log is always printed, success or failure.
pub fn cmd_build(args: BuildArgs) -> Result<()> {
    let mut orch_config = OrchestratorConfig::new(args.base_dir);
    if let Some(tool) = args.tool {
        orch_config.tool = tool;
    }
    orch_config.keep_workdirs = args.keep_workdirs;
    orch_config.timeout = args.timeout.map(Duration::from_secs);

    if let ToolCheck::Missing { tool } = preflight::check_tool(&orch_config) {
        bail!("Packaging tool '{tool}' not found in PATH. Run `packwright preflight`.");
    }

    let mut options = config::load_options().unwrap_or_default();
    if args.onedir {
        options.output_mode = OutputMode::Directory;
    }
    if args.icon.is_some() {
        options.icon_path = args.icon;
    }
    if args.add_data.is_some() {
        options.extra_data = args.add_data;
    }
    if args.verbose {
        options.verbose = true;
    }

    let source_bytes = fs::read(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let source_file_name = args
        .script
        .file_name()
        .with_context(|| format!("Not a file path: {}", args.script.display()))?
        .to_string_lossy()
        .into_owned();

    println!("=== Building {source_file_name} ===");

    let orchestrator = Orchestrator::new(orch_config);
    let result = orchestrator.submit(&BuildRequest {
        source_bytes,
        source_file_name,
        options,
    });

    if !result.log_text().is_empty() {
        println!("{}", result.log_text());
    }

    match result {
        BuildResult::Success { artifact_path, .. } => {
            println!("Artifact: {}", artifact_path.display());
            Ok(())
        }
        BuildResult::Failure { reason, .. } => bail!("Build failed: {reason}"),
    }
}
