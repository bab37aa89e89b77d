//! Shared test utilities for packwright tests.
//!
//! Builds run against stub packaging tools: small shell scripts that parse
//! the same flags the real tool would receive and then behave as the test
//! dictates (emit an artifact, fail with a given status, hang, ...).

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

use packwright::OrchestratorConfig;

/// Test environment with a temporary base directory and a stub tool dir.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Base directory for workspaces, artifacts, and the audit log
    pub base_dir: PathBuf,
    /// Directory stub tools are written into
    pub tools_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_dir = temp_dir.path().join("base");
        let tools_dir = temp_dir.path().join("tools");
        fs::create_dir_all(&base_dir).expect("Failed to create base dir");
        fs::create_dir_all(&tools_dir).expect("Failed to create tools dir");

        Self {
            _temp_dir: temp_dir,
            base_dir,
            tools_dir,
        }
    }

    /// Orchestrator config pointing at a stub tool.
    pub fn config(&self, tool: &Path) -> OrchestratorConfig {
        let mut config = OrchestratorConfig::new(&self.base_dir);
        config.tool = tool.display().to_string();
        config
    }

    /// Same, with a build deadline.
    pub fn config_with_timeout(&self, tool: &Path, timeout: Duration) -> OrchestratorConfig {
        let mut config = self.config(tool);
        config.timeout = Some(timeout);
        config
    }

    /// Stub tool that writes `<name>.exe` into the dist dir and exits 0.
    pub fn stub_tool_success(&self) -> PathBuf {
        self.write_stub(
            "tool-ok.sh",
            r#"echo "packing $name"
echo "stub warning" >&2
printf 'stub-binary' > "$dist/$name.exe"
exit 0
"#,
        )
    }

    /// Stub tool that exits with `code` without producing anything.
    pub fn stub_tool_failing(&self, code: i32) -> PathBuf {
        self.write_stub(
            &format!("tool-fail-{code}.sh"),
            &format!("echo \"boom\" >&2\nexit {code}\n"),
        )
    }

    /// Stub tool that exits 0 but never writes an artifact.
    pub fn stub_tool_no_artifact(&self) -> PathBuf {
        self.write_stub("tool-empty.sh", "echo \"done, allegedly\"\nexit 0\n")
    }

    /// Stub tool that sleeps far past any test deadline.
    pub fn stub_tool_hanging(&self) -> PathBuf {
        self.write_stub("tool-hang.sh", "sleep 60\nexit 0\n")
    }

    fn write_stub(&self, file_name: &str, body: &str) -> PathBuf {
        // Common prologue: parse the flags the orchestrator always passes.
        let script = format!(
            r#"#!/bin/sh
dist=""
work=""
name=""
while [ $# -gt 0 ]; do
  case "$1" in
    --distpath) dist="$2"; shift 2 ;;
    --workpath) work="$2"; shift 2 ;;
    --name) name="$2"; shift 2 ;;
    *) shift ;;
  esac
done
{body}"#
        );

        let path = self.tools_dir.join(file_name);
        fs::write(&path, script).expect("Failed to write stub tool");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod stub tool");
        path
    }
}
