//! Typed errors for build and artifact operations.
//!
//! The build path folds every failure into a `BuildResult::Failure` with a
//! human-readable reason; the artifact utilities return these errors
//! directly so callers can distinguish a missing file from a destination
//! conflict.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the orchestrator and artifact utilities.
#[derive(Debug, Error)]
pub enum Error {
    /// A file system operation failed (permission, missing path, disk full).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The packaging tool exited with a nonzero status.
    #[error("packaging tool exited with status {status}")]
    ProcessFailure { status: i32 },

    /// The packaging tool succeeded but the expected output file is absent.
    #[error("artifact not found")]
    ArtifactNotFound,

    /// The packaging tool ran past the configured deadline and was killed.
    #[error("packaging tool timed out after {secs}s")]
    Timeout { secs: u64 },

    /// A utility operation targeted a file that does not exist.
    #[error("not found: {path}")]
    NotFound { path: PathBuf },

    /// A utility operation's destination already exists.
    #[error("destination already exists: {path}")]
    Conflict { path: PathBuf },

    /// An archive source directory is missing or has nothing to archive.
    #[error("nothing to archive: {path}")]
    EmptyArchiveSource { path: PathBuf },

    /// A submitted script name contained path separators or was empty.
    #[error("invalid script file name: {name:?}")]
    InvalidFileName { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
