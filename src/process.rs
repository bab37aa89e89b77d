//! Centralized command execution with consistent error handling.
//!
//! This module provides a unified API for running external commands,
//! ensuring all commands capture stdout and stderr and can be killed when
//! they run past a deadline.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// Result of a command execution.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit status, if the process completed before any deadline.
    pub status: Option<ExitStatus>,
    /// Captured stdout as a string.
    pub stdout: String,
    /// Captured stderr as a string.
    pub stderr: String,
    /// True if the process was killed because it exceeded the deadline.
    pub timed_out: bool,
}

impl CommandResult {
    /// Returns true if the command completed and exited successfully.
    pub fn success(&self) -> bool {
        self.status.map(|s| s.success()).unwrap_or(false)
    }

    /// Get the exit code, or -1 if terminated by signal or deadline.
    pub fn code(&self) -> i32 {
        self.status.and_then(|s| s.code()).unwrap_or(-1)
    }

    /// Combined stdout followed by stderr, the log payload for one run.
    pub fn combined_log(&self) -> String {
        let mut log = String::with_capacity(self.stdout.len() + self.stderr.len());
        log.push_str(&self.stdout);
        log.push_str(&self.stderr);
        log
    }
}

/// Builder for configuring command execution.
pub struct Cmd {
    program: String,
    args: Vec<String>,
    current_dir: Option<std::path::PathBuf>,
    timeout: Option<Duration>,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new(program: impl AsRef<str>) -> Self {
        Self {
            program: program.as_ref().to_string(),
            args: Vec::new(),
            current_dir: None,
            timeout: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    /// Set the working directory.
    pub fn dir(mut self, dir: &Path) -> Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    /// Kill the process if it has not exited within `timeout`.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the command and capture its output.
    ///
    /// A nonzero exit is not an error here; callers inspect the result.
    /// Failing to spawn at all (tool not installed) is an error.
    pub fn run(self) -> Result<CommandResult> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd
            .spawn()
            .with_context(|| format!("Failed to execute '{}'. Is it installed?", self.program))?;

        // Drain both pipes on helper threads so the child never blocks on a
        // full pipe while we poll for exit.
        let stdout_handle = spawn_reader(child.stdout.take());
        let stderr_handle = spawn_reader(child.stderr.take());

        let (status, timed_out) = match self.timeout {
            None => (Some(child.wait()?), false),
            Some(limit) => match wait_timeout(&mut child, limit)? {
                Some(status) => (Some(status), false),
                None => {
                    let _ = child.kill();
                    let _ = child.wait(); // reap
                    (None, true)
                }
            },
        };

        let stdout = stdout_handle.join().unwrap_or_default();
        let stderr = stderr_handle.join().unwrap_or_default();

        Ok(CommandResult {
            status,
            stdout,
            stderr,
            timed_out,
        })
    }
}

fn spawn_reader<R: Read + Send + 'static>(
    source: Option<R>,
) -> std::thread::JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut source) = source {
            let _ = source.read_to_string(&mut buf);
        }
        buf
    })
}

/// Poll for exit until `limit` elapses. Returns None on deadline expiry.
fn wait_timeout(child: &mut Child, limit: Duration) -> Result<Option<ExitStatus>> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(50);

    loop {
        match child.try_wait()? {
            Some(status) => return Ok(Some(status)),
            None => {
                if start.elapsed() >= limit {
                    return Ok(None);
                }
                std::thread::sleep(poll_interval);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_success() {
        let result = Cmd::new("echo").arg("hello").run().unwrap();
        assert!(result.success());
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[test]
    fn test_run_captures_stderr() {
        // `ls` on a non-existent file writes to stderr
        let result = Cmd::new("ls").arg("/nonexistent_path_12345").run().unwrap();
        assert!(!result.success());
        assert!(!result.stderr.is_empty());
    }

    #[test]
    fn test_nonzero_exit_is_not_an_error() {
        let result = Cmd::new("false").run().unwrap();
        assert!(!result.success());
        assert_eq!(result.code(), 1);
    }

    #[test]
    fn test_missing_program_is_an_error() {
        assert!(Cmd::new("nonexistent_program_12345").run().is_err());
    }

    #[test]
    fn test_combined_log_order() {
        let result = Cmd::new("sh")
            .arg("-c")
            .arg("echo out; echo err >&2")
            .run()
            .unwrap();
        let log = result.combined_log();
        let out_pos = log.find("out").unwrap();
        let err_pos = log.find("err").unwrap();
        assert!(out_pos < err_pos);
    }

    #[test]
    fn test_timeout_kills_process() {
        let result = Cmd::new("sleep")
            .arg("30")
            .timeout(Some(Duration::from_millis(200)))
            .run()
            .unwrap();
        assert!(result.timed_out);
        assert!(result.status.is_none());
    }

    #[test]
    fn test_run_in_directory() {
        let result = Cmd::new("pwd").dir(Path::new("/tmp")).run().unwrap();
        assert!(result.stdout.trim().contains("tmp"));
    }
}
