//! Stateless operations on a produced artifact.
//!
//! Each function takes explicit paths and returns a typed result; there is
//! no shared state between calls beyond the file system itself.

use flate2::write::GzEncoder;
use flate2::Compression;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Block size for streaming digests.
const DIGEST_BLOCK_SIZE: usize = 8192;

/// SHA-256 of the file's bytes as a lowercase hex string.
///
/// Reads in fixed-size blocks so large artifacts never land in memory
/// whole. Read errors propagate; a file disappearing mid-read is an error,
/// not an empty digest.
pub fn compute_digest(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::NotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(e),
    })?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut block = [0u8; DIGEST_BLOCK_SIZE];

    loop {
        let n = reader.read(&mut block)?;
        if n == 0 {
            break;
        }
        hasher.update(&block[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Compare the file's digest against a caller-supplied hex string.
///
/// Exact, case-sensitive comparison; purely informational.
pub fn compare_digest(path: &Path, expected_hex: &str) -> Result<bool> {
    Ok(compute_digest(path)? == expected_hex)
}

/// Archive `source_dir` recursively into a gzip-compressed tar at
/// `dest_path`, preserving paths relative to `source_dir`.
///
/// A missing source directory or one with no files is an error; an archive
/// with zero entries is never written.
pub fn archive_directory(source_dir: &Path, dest_path: &Path) -> Result<()> {
    if !source_dir.is_dir() {
        return Err(Error::NotFound {
            path: source_dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(source_dir) {
        let entry = entry.map_err(|e| {
            Error::Io(e.into_io_error().unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::Other, "directory walk failed")
            }))
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    if files.is_empty() {
        return Err(Error::EmptyArchiveSource {
            path: source_dir.to_path_buf(),
        });
    }

    let dest = File::create(dest_path)?;
    let encoder = GzEncoder::new(dest, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for file in &files {
        // Walk roots at source_dir, so strip_prefix cannot fail here.
        let relative = file.strip_prefix(source_dir).unwrap_or(file);
        builder.append_path_with_name(file, relative)?;
    }
    builder.into_inner()?.finish()?;
    Ok(())
}

/// Rename the artifact within its directory.
///
/// Fails with [`Error::Conflict`] if the destination exists and `overwrite`
/// is false. Returns the new path.
pub fn rename_artifact(path: &Path, new_name: &str, overwrite: bool) -> Result<PathBuf> {
    if !path.exists() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }
    let new_path = path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(new_name);
    if new_path.exists() && !overwrite {
        return Err(Error::Conflict { path: new_path });
    }
    fs::rename(path, &new_path)?;
    Ok(new_path)
}

/// Copy the artifact to `<path>.bak`, preserving permission bits.
///
/// Returns the backup path.
pub fn backup_artifact(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }
    let mut backup_name = path.as_os_str().to_owned();
    backup_name.push(".bak");
    let backup_path = PathBuf::from(backup_name);

    // fs::copy carries permission bits along with the contents.
    fs::copy(path, &backup_path)?;
    Ok(backup_path)
}

/// Delete the artifact.
pub fn remove_artifact(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }
    fs::remove_file(path)?;
    Ok(())
}
