//! Orchestrator configuration and persisted build options.
//!
//! Two distinct concerns live here:
//! - `OrchestratorConfig`: explicit, caller-constructed settings for one
//!   orchestrator instance (tool name, base directory, timeout). Nothing is
//!   read from module-level globals; every build derives its paths from this
//!   struct.
//! - Persisted `BuildOptions`: a flat JSON object at a well-known path,
//!   written and read whole-file. A missing file is the "no config yet"
//!   state and loads as defaults, never as an error.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::orchestrator::BuildOptions;

/// Default command name of the external packaging tool.
pub const DEFAULT_TOOL: &str = "pyinstaller";

/// Default suffix of the produced executable.
pub const DEFAULT_EXE_SUFFIX: &str = ".exe";

/// Settings for one orchestrator instance.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Command name (or path) of the packaging tool.
    pub tool: String,
    /// Base directory under which per-build workspaces are created.
    pub base_dir: PathBuf,
    /// Suffix the packaging tool gives its output executable (e.g. ".exe").
    pub exe_suffix: String,
    /// Keep working directories after a build instead of removing them.
    pub keep_workdirs: bool,
    /// Kill the packaging tool if it runs longer than this.
    pub timeout: Option<Duration>,
}

impl OrchestratorConfig {
    /// Create a config with defaults rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            base_dir: base_dir.into(),
            exe_suffix: DEFAULT_EXE_SUFFIX.to_string(),
            keep_workdirs: false,
            timeout: None,
        }
    }

    /// Path of the append-only audit log for this orchestrator.
    pub fn audit_log_path(&self) -> PathBuf {
        self.base_dir.join("packwright.log")
    }
}

/// Well-known path of the persisted options file.
///
/// `PACKWRIGHT_CONFIG_DIR` overrides the platform config directory, which
/// keeps tests hermetic.
pub fn options_path() -> PathBuf {
    let dir = std::env::var_os("PACKWRIGHT_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join("packwright").join("options.json")
}

/// Load persisted build options from `path`.
///
/// Returns defaults if the file does not exist.
pub fn load_options_from(path: &Path) -> Result<BuildOptions> {
    if !path.exists() {
        return Ok(BuildOptions::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read options file {}", path.display()))?;
    let options = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse options file {}", path.display()))?;
    Ok(options)
}

/// Write build options to `path` as a flat JSON object, whole-file.
pub fn save_options_to(path: &Path, options: &BuildOptions) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(options)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write options file {}", path.display()))?;
    Ok(())
}

/// Load persisted build options from the well-known path.
pub fn load_options() -> Result<BuildOptions> {
    load_options_from(&options_path())
}

/// Persist build options to the well-known path.
pub fn save_options(options: &BuildOptions) -> Result<()> {
    save_options_to(&options_path(), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::OutputMode;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let options = load_options_from(&temp.path().join("options.json")).unwrap();
        assert_eq!(options, BuildOptions::default());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("options.json");

        let options = BuildOptions {
            output_mode: OutputMode::Directory,
            icon_path: Some(PathBuf::from("app.ico")),
            extra_data: Some("assets:assets".to_string()),
            verbose: true,
        };
        save_options_to(&path, &options).unwrap();

        let loaded = load_options_from(&path).unwrap();
        assert_eq!(loaded, options);
    }

    #[test]
    fn test_config_defaults() {
        let config = OrchestratorConfig::new("/tmp/pw");
        assert_eq!(config.tool, DEFAULT_TOOL);
        assert_eq!(config.exe_suffix, ".exe");
        assert!(!config.keep_workdirs);
        assert!(config.timeout.is_none());
    }
}
