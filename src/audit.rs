//! Append-only build audit log.
//!
//! One entry per build attempt: a human-readable timestamp, the submitted
//! file name, the outcome, and the captured tool log. The file is never
//! truncated or rotated here. Writing is best-effort; a failing audit sink
//! must never fail the build, so errors are reported to stderr and dropped.

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::orchestrator::BuildResult;

/// Append one build attempt to the audit log at `log_path`.
pub fn append_entry(log_path: &Path, source_file_name: &str, result: &BuildResult) {
    if let Err(e) = try_append(log_path, source_file_name, result) {
        eprintln!("[WARN] Failed to write audit log {}: {}", log_path.display(), e);
    }
}

fn try_append(log_path: &Path, source_file_name: &str, result: &BuildResult) -> std::io::Result<()> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let (outcome, log_text) = match result {
        BuildResult::Success { artifact_path, log_text } => {
            (format!("success: {}", artifact_path.display()), log_text)
        }
        BuildResult::Failure { reason, log_text } => (format!("failure: {reason}"), log_text),
    };

    let mut file = OpenOptions::new().create(true).append(true).open(log_path)?;
    writeln!(file, "[{timestamp}] {source_file_name} -> {outcome}")?;
    if !log_text.is_empty() {
        writeln!(file, "{log_text}")?;
    }
    Ok(())
}
