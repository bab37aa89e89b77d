//! Artifact utility commands - digest, archive, rename, backup, remove.

use anyhow::{bail, Result};
use std::path::Path;

use crate::artifact;

/// Print the SHA-256 digest of a file, optionally comparing it against an
/// expected value.
pub fn cmd_digest(path: &Path, expect: Option<&str>) -> Result<()> {
    let digest = artifact::compute_digest(path)?;
    println!("{digest}  {}", path.display());

    if let Some(expected) = expect {
        if digest == expected {
            println!("Digest matches.");
        } else {
            bail!("Digest mismatch: expected {expected}");
        }
    }
    Ok(())
}

/// Archive a directory into a compressed tarball.
pub fn cmd_archive(source_dir: &Path, dest: &Path) -> Result<()> {
    artifact::archive_directory(source_dir, dest)?;
    println!("Archived {} -> {}", source_dir.display(), dest.display());
    Ok(())
}

/// Rename an artifact within its directory.
pub fn cmd_rename(path: &Path, new_name: &str, overwrite: bool) -> Result<()> {
    let new_path = artifact::rename_artifact(path, new_name, overwrite)?;
    println!("Renamed {} -> {}", path.display(), new_path.display());
    Ok(())
}

/// Copy an artifact to `<path>.bak`.
pub fn cmd_backup(path: &Path) -> Result<()> {
    let backup_path = artifact::backup_artifact(path)?;
    println!("Backed up {} -> {}", path.display(), backup_path.display());
    Ok(())
}

/// Delete an artifact.
pub fn cmd_remove(path: &Path) -> Result<()> {
    artifact::remove_artifact(path)?;
    println!("Removed {}", path.display());
    Ok(())
}
