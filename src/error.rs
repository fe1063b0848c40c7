//! Application error types using thiserror
//!
//! Error hierarchy:
//! - PackagerError: failures of yarn invocations and script runs
//! - ConfigError: Issues with the configuration file or CLI options
//! - IoError: File system operation failures

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the packager adapter
#[derive(Error, Debug)]
pub enum PackagerError {
    /// External command exited with a non-zero status
    #[error("command `{command}` failed with {}", exit_status(.code))]
    ProcessExecution {
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// External command could not be started at all
    #[error("failed to execute `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A package script failed; later scripts in the sequence were not run
    #[error("script '{script}' failed: {source}")]
    ScriptExecution {
        script: String,
        #[source]
        source: Box<PackagerError>,
    },

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// A value is syntactically valid but not acceptable
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Failed to read a file
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PackagerError {
    /// Creates a new ProcessExecution error
    pub fn process_execution(
        command: impl Into<String>,
        code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        PackagerError::ProcessExecution {
            command: command.into(),
            code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Creates a new Spawn error
    pub fn spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        PackagerError::Spawn {
            command: command.into(),
            source,
        }
    }

    /// Wraps an error as the failure of a named script
    pub fn script_execution(script: impl Into<String>, source: PackagerError) -> Self {
        PackagerError::ScriptExecution {
            script: script.into(),
            source: Box::new(source),
        }
    }

    /// Captured stderr of a failed process, if any
    pub fn stderr(&self) -> Option<&str> {
        match self {
            PackagerError::ProcessExecution { stderr, .. } => Some(stderr),
            PackagerError::ScriptExecution { source, .. } => source.stderr(),
            _ => None,
        }
    }
}

impl ConfigError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new ParseError
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidValue error
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl IoError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::WriteError {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_execution_with_code() {
        let err = PackagerError::process_execution("yarn install", Some(1), "", "boom");
        let msg = format!("{}", err);
        assert!(msg.contains("yarn install"));
        assert!(msg.contains("exit code 1"));
        assert_eq!(err.stderr(), Some("boom"));
    }

    #[test]
    fn test_process_execution_without_code() {
        let err = PackagerError::process_execution("yarn install", None, "", "");
        let msg = format!("{}", err);
        assert!(msg.contains("terminated by signal"));
    }

    #[test]
    fn test_spawn_error() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err = PackagerError::spawn("yarn --version", source);
        let msg = format!("{}", err);
        assert!(msg.contains("failed to execute"));
        assert!(msg.contains("not found"));
        assert!(err.stderr().is_none());
    }

    #[test]
    fn test_script_execution_keeps_stderr() {
        let inner = PackagerError::process_execution("yarn run build", Some(2), "", "tsc error");
        let err = PackagerError::script_execution("build", inner);
        let msg = format!("{}", err);
        assert!(msg.contains("script 'build' failed"));
        assert_eq!(err.stderr(), Some("tsc error"));
    }

    #[test]
    fn test_config_error_parse() {
        let err = ConfigError::parse_error("/path/to/yarnpack.toml", "expected a boolean");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse config file"));
        assert!(msg.contains("expected a boolean"));
    }

    #[test]
    fn test_config_error_invalid_value() {
        let err = ConfigError::invalid_value("network_concurrency", "must be at least 1");
        let msg = format!("{}", err);
        assert!(msg.contains("invalid value for 'network_concurrency'"));
    }

    #[test]
    fn test_io_error_write() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = IoError::write_error("/path/to/yarn.lock", source);
        let msg = format!("{}", err);
        assert!(msg.contains("failed to write"));
        assert!(msg.contains("yarn.lock"));
    }

    #[test]
    fn test_packager_error_from_config_error() {
        let config_err = ConfigError::invalid_value("ignored_errors", "empty prefix");
        let err: PackagerError = config_err.into();
        let msg = format!("{}", err);
        assert!(msg.contains("empty prefix"));
    }

    #[test]
    fn test_error_debug_trait() {
        let err = PackagerError::process_execution("yarn", Some(1), "", "");
        let debug = format!("{:?}", err);
        assert!(debug.contains("ProcessExecution"));
    }
}
