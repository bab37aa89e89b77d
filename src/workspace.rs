//! Per-build working directories.
//!
//! Each build gets a uniquely-named root under `<base>/builds/` holding the
//! three directories the packaging tool needs: input (the submitted script),
//! output (where the artifact lands), and temp (the tool's scratch space).
//! Unique roots mean two concurrent builds never race on the same paths.
//!
//! The workspace is removed on every exit path via `Drop` unless the caller
//! asked to keep it, so intermediate files never outlive the build.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Transient working directories for one build.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    /// Directory the submitted script is written into.
    pub input_dir: PathBuf,
    /// Directory the packaging tool writes the artifact into.
    pub output_dir: PathBuf,
    /// Scratch directory for the packaging tool's intermediate files.
    pub temp_dir: PathBuf,
    keep: bool,
}

impl Workspace {
    /// Create a fresh workspace under `<base_dir>/builds/<unique-id>/`.
    ///
    /// All three directories exist when this returns. If `keep` is true the
    /// workspace survives drop (for inspecting a build or serving the
    /// artifact in place).
    pub fn create(base_dir: &Path, keep: bool) -> Result<Self> {
        let root = base_dir.join("builds").join(Uuid::new_v4().to_string());

        let input_dir = root.join("input");
        let output_dir = root.join("output");
        let temp_dir = root.join("temp");

        for dir in [&input_dir, &output_dir, &temp_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create work directory {}", dir.display()))?;
        }

        Ok(Self {
            root,
            input_dir,
            output_dir,
            temp_dir,
            keep,
        })
    }

    /// Root directory of this workspace.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Move the artifact out of the workspace before the directories are
    /// removed. Returns the new path, `<dest_dir>/<file name>`.
    pub fn extract_artifact(&self, artifact: &Path, dest_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dest_dir)
            .with_context(|| format!("Failed to create {}", dest_dir.display()))?;

        let file_name = artifact
            .file_name()
            .with_context(|| format!("Artifact path has no file name: {}", artifact.display()))?;
        let dest = dest_dir.join(file_name);

        // Rename first; fall back to copy+remove for cross-device moves.
        if fs::rename(artifact, &dest).is_err() {
            fs::copy(artifact, &dest)
                .with_context(|| format!("Failed to copy artifact to {}", dest.display()))?;
            fs::remove_file(artifact)?;
        }
        Ok(dest)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if !self.keep {
            // Idempotent cleanup; nothing to report if already gone.
            let _ = fs::remove_dir_all(&self.root);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_makes_all_three_dirs() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::create(temp.path(), false).unwrap();
        assert!(ws.input_dir.is_dir());
        assert!(ws.output_dir.is_dir());
        assert!(ws.temp_dir.is_dir());
    }

    #[test]
    fn test_unique_roots_per_build() {
        let temp = TempDir::new().unwrap();
        let a = Workspace::create(temp.path(), false).unwrap();
        let b = Workspace::create(temp.path(), false).unwrap();
        assert_ne!(a.root(), b.root());
    }

    #[test]
    fn test_drop_removes_workspace() {
        let temp = TempDir::new().unwrap();
        let root = {
            let ws = Workspace::create(temp.path(), false).unwrap();
            fs::write(ws.temp_dir.join("scratch.o"), b"junk").unwrap();
            ws.root().to_path_buf()
        };
        assert!(!root.exists());
    }

    #[test]
    fn test_keep_preserves_workspace() {
        let temp = TempDir::new().unwrap();
        let root = {
            let ws = Workspace::create(temp.path(), true).unwrap();
            ws.root().to_path_buf()
        };
        assert!(root.exists());
    }

    #[test]
    fn test_extract_artifact_moves_file_out() {
        let temp = TempDir::new().unwrap();
        let dest_dir = temp.path().join("artifacts");
        let ws = Workspace::create(temp.path(), false).unwrap();

        let artifact = ws.output_dir.join("hello.exe");
        fs::write(&artifact, b"binary").unwrap();

        let moved = ws.extract_artifact(&artifact, &dest_dir).unwrap();
        assert_eq!(moved, dest_dir.join("hello.exe"));
        assert!(moved.exists());
        assert!(!artifact.exists());
    }
}
