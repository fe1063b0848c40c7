//! External process execution
//!
//! This module provides:
//! - The `ProcessRunner` capability the packager is written against
//! - A system implementation backed by `std::process::Command`

use crate::error::PackagerError;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Captured output of a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Standard output from the command
    pub stdout: String,
    /// Standard error from the command
    pub stderr: String,
}

impl ProcessOutput {
    /// Create a new process output
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

/// Trait for running external commands
///
/// A non-zero exit must be reported as [`PackagerError::ProcessExecution`]
/// carrying the captured stdout and stderr.
pub trait ProcessRunner {
    /// Run `command` with `args` in `cwd` and wait for it to exit
    fn run(
        &self,
        command: &str,
        args: &[String],
        cwd: &Path,
    ) -> Result<ProcessOutput, PackagerError>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(
        &self,
        command: &str,
        args: &[String],
        cwd: &Path,
    ) -> Result<ProcessOutput, PackagerError> {
        (**self).run(command, args, cwd)
    }
}

/// Format a command line for logs and error messages
pub fn command_line(command: &str, args: &[String]) -> String {
    if args.is_empty() {
        command.to_string()
    } else {
        format!("{} {}", command, args.join(" "))
    }
}

/// Default runner that executes real commands
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    /// Create a new system process runner
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(
        &self,
        command: &str,
        args: &[String],
        cwd: &Path,
    ) -> Result<ProcessOutput, PackagerError> {
        let command_str = command_line(command, args);
        debug!(command = %command_str, cwd = %cwd.display(), "spawning process");

        let output = Command::new(command)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| PackagerError::spawn(command_str.clone(), e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            Ok(ProcessOutput { stdout, stderr })
        } else {
            debug!(command = %command_str, code = ?output.status.code(), "process failed");
            Err(PackagerError::process_execution(
                command_str,
                output.status.code(),
                stdout,
                stderr,
            ))
        }
    }
}
