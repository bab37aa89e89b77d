//! The build workflow: persist a submitted script, drive the packaging
//! tool, and locate the produced artifact.
//!
//! One call to [`Orchestrator::submit`] covers the whole sequence:
//! workspace creation, script write, tool invocation, artifact lookup,
//! audit logging, and workspace teardown. Every failure along the way is
//! folded into [`BuildResult::Failure`] with the captured tool log, so any
//! front end can surface the reason and log verbatim.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::audit;
use crate::config::OrchestratorConfig;
use crate::error::Error;
use crate::process::Cmd;
use crate::workspace::Workspace;

/// How the packaging tool should lay out its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Bundle everything into a single executable file.
    #[default]
    SingleFile,
    /// Produce a directory with the executable plus support files.
    Directory,
}

/// Caller-supplied options for one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BuildOptions {
    /// Single-file or directory output.
    #[serde(default)]
    pub output_mode: OutputMode,
    /// Icon file to embed, if any.
    #[serde(default)]
    pub icon_path: Option<PathBuf>,
    /// Data-bundling spec passed through to the tool (`SRC:DEST` form).
    #[serde(default)]
    pub extra_data: Option<String>,
    /// Ask the tool for verbose output.
    #[serde(default)]
    pub verbose: bool,
}

/// One build submission: the script's bytes, its file name, and options.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub source_bytes: Vec<u8>,
    pub source_file_name: String,
    pub options: BuildOptions,
}

/// Outcome of one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildResult {
    /// The tool exited zero and the expected artifact exists.
    Success {
        artifact_path: PathBuf,
        log_text: String,
    },
    /// Anything else: tool failure, missing artifact, timeout, I/O error.
    Failure { reason: String, log_text: String },
}

impl BuildResult {
    /// Returns the artifact path on success.
    pub fn artifact_path(&self) -> Option<&Path> {
        match self {
            BuildResult::Success { artifact_path, .. } => Some(artifact_path),
            BuildResult::Failure { .. } => None,
        }
    }

    /// The captured tool log, regardless of outcome.
    pub fn log_text(&self) -> &str {
        match self {
            BuildResult::Success { log_text, .. } => log_text,
            BuildResult::Failure { log_text, .. } => log_text,
        }
    }

    fn failure(reason: impl ToString, log_text: String) -> Self {
        BuildResult::Failure {
            reason: reason.to_string(),
            log_text,
        }
    }
}

/// Drives builds according to one [`OrchestratorConfig`].
pub struct Orchestrator {
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(config: OrchestratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Run one build end to end.
    ///
    /// On success with ephemeral workdirs the artifact is moved out to
    /// `<base>/artifacts/` before the workspace is removed; with
    /// `keep_workdirs` it stays where the tool wrote it.
    pub fn submit(&self, request: &BuildRequest) -> BuildResult {
        let result = self.submit_inner(request);
        // Audit sink is best-effort; a full disk must not fail the build.
        audit::append_entry(&self.config.audit_log_path(), &request.source_file_name, &result);
        result
    }

    fn submit_inner(&self, request: &BuildRequest) -> BuildResult {
        let workspace = match Workspace::create(&self.config.base_dir, self.config.keep_workdirs) {
            Ok(ws) => ws,
            Err(e) => return BuildResult::failure(format!("{e:#}"), String::new()),
        };

        let script_path = match submit_script(
            &workspace.input_dir,
            &request.source_bytes,
            &request.source_file_name,
        ) {
            Ok(path) => path,
            Err(e) => return BuildResult::failure(e, String::new()),
        };

        let result = run_build(&self.config, &workspace, &script_path, &request.options);

        match result {
            BuildResult::Success {
                artifact_path,
                log_text,
            } if !self.config.keep_workdirs => {
                // The workspace is about to be torn down; move the artifact
                // somewhere durable first.
                let dest_dir = self.config.base_dir.join("artifacts");
                match workspace.extract_artifact(&artifact_path, &dest_dir) {
                    Ok(moved) => BuildResult::Success {
                        artifact_path: moved,
                        log_text,
                    },
                    Err(e) => BuildResult::failure(format!("{e:#}"), log_text),
                }
            }
            other => other,
        }
    }
}

/// Write the submitted script's bytes verbatim to `<input_dir>/<file_name>`.
///
/// The name must be a bare file name; anything with path separators is
/// rejected rather than written outside the input directory.
pub fn submit_script(input_dir: &Path, bytes: &[u8], file_name: &str) -> Result<PathBuf, Error> {
    if file_name.is_empty()
        || file_name.contains('/')
        || file_name.contains('\\')
        || file_name == "."
        || file_name == ".."
    {
        return Err(Error::InvalidFileName {
            name: file_name.to_string(),
        });
    }

    let path = input_dir.join(file_name);
    fs::write(&path, bytes)?;
    Ok(path)
}

/// Base name of a script: file name without its final extension.
pub fn base_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}

/// Argument list for the packaging tool, in the tool's expected order.
pub fn build_args(
    workspace: &Workspace,
    script_path: &Path,
    base: &str,
    options: &BuildOptions,
) -> Vec<String> {
    let mut args = vec![
        "--distpath".to_string(),
        workspace.output_dir.display().to_string(),
        "--workpath".to_string(),
        workspace.temp_dir.display().to_string(),
        "--name".to_string(),
        base.to_string(),
    ];

    if let Some(ref icon) = options.icon_path {
        args.push(format!("--icon={}", icon.display()));
    }
    if let Some(ref spec) = options.extra_data {
        args.push(format!("--add-data={spec}"));
    }
    if options.verbose {
        args.push("--log-level=DEBUG".to_string());
    }
    args.push(match options.output_mode {
        OutputMode::SingleFile => "--onefile".to_string(),
        OutputMode::Directory => "--onedir".to_string(),
    });

    args.push(script_path.display().to_string());
    args
}

/// Invoke the packaging tool synchronously and map its outcome to a
/// [`BuildResult`].
///
/// Combined stdout then stderr is the log payload. Nonzero exit, deadline
/// expiry, and a missing output file are all failures with distinct
/// reasons.
pub fn run_build(
    config: &OrchestratorConfig,
    workspace: &Workspace,
    script_path: &Path,
    options: &BuildOptions,
) -> BuildResult {
    let base = base_name(
        &script_path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    );

    let mut cmd = Cmd::new(&config.tool).timeout(config.timeout);
    for arg in build_args(workspace, script_path, &base, options) {
        cmd = cmd.arg(arg);
    }

    let result = match cmd.run() {
        Ok(result) => result,
        Err(e) => return BuildResult::failure(format!("{e:#}"), String::new()),
    };
    let log_text = result.combined_log();

    if result.timed_out {
        let secs = config.timeout.map(|t| t.as_secs()).unwrap_or(0);
        return BuildResult::failure(Error::Timeout { secs }, log_text);
    }
    if !result.success() {
        return BuildResult::failure(
            Error::ProcessFailure {
                status: result.code(),
            },
            log_text,
        );
    }

    match locate_artifact(&workspace.output_dir, &base, &config.exe_suffix) {
        Some(artifact_path) => BuildResult::Success {
            artifact_path,
            log_text,
        },
        None => BuildResult::failure(Error::ArtifactNotFound, log_text),
    }
}

/// Find the produced executable in `output_dir`.
///
/// The exact name `<base_name><suffix>` wins. Only if that file is absent
/// does the scan fall back to the first name (in sorted order) that starts
/// with `base_name` and ends with `suffix`, so two scripts sharing a prefix
/// can never steal each other's artifact.
pub fn locate_artifact(output_dir: &Path, base_name: &str, suffix: &str) -> Option<PathBuf> {
    let exact = output_dir.join(format!("{base_name}{suffix}"));
    if exact.is_file() {
        return Some(exact);
    }

    let mut names: Vec<String> = fs::read_dir(output_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    names
        .into_iter()
        .find(|name| name.starts_with(base_name) && name.ends_with(suffix))
        .map(|name| output_dir.join(name))
}
