//! Classification of failed dependency listings
//!
//! Yarn may exit non-zero while still printing a usable listing (for
//! example when peer dependency warnings are reported as errors). Such a
//! failure is treated as benign when every stderr line is a known, ignored
//! error and stdout still carries data.

use crate::error::PackagerError;
use serde::Deserialize;
use tracing::warn;

/// An error marker that does not invalidate a listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IgnoredError {
    /// Prefix a stderr line must start with
    pub prefix: String,
    /// Whether a recovered line is logged
    #[serde(default)]
    pub log: bool,
}

impl IgnoredError {
    /// Create a new ignored error marker
    pub fn new(prefix: impl Into<String>, log: bool) -> Self {
        Self {
            prefix: prefix.into(),
            log,
        }
    }

    fn matches(&self, line: &str) -> bool {
        line.starts_with(&self.prefix)
    }
}

/// Returns the marker matching a stderr line, if any
fn find_ignored<'a>(line: &str, ignored: &'a [IgnoredError]) -> Option<&'a IgnoredError> {
    ignored.iter().find(|marker| marker.matches(line))
}

/// Decide whether a failed listing can still be used
///
/// True iff stdout is non-empty and every non-empty stderr line starts with
/// one of the `ignored` prefixes.
pub fn is_benign_failure(stdout: &str, stderr: &str, ignored: &[IgnoredError]) -> bool {
    if stdout.trim().is_empty() {
        return false;
    }

    stderr
        .lines()
        .filter(|line| !line.trim().is_empty())
        .all(|line| find_ignored(line, ignored).is_some())
}

/// Turn a failed listing into its stdout when the failure is benign
///
/// Any other error is returned unchanged.
pub fn recover_listing(
    err: PackagerError,
    ignored: &[IgnoredError],
) -> Result<String, PackagerError> {
    match err {
        PackagerError::ProcessExecution {
            command,
            code,
            stdout,
            stderr,
        } => {
            if !is_benign_failure(&stdout, &stderr, ignored) {
                return Err(PackagerError::ProcessExecution {
                    command,
                    code,
                    stdout,
                    stderr,
                });
            }

            for line in stderr.lines().filter(|line| !line.trim().is_empty()) {
                if find_ignored(line, ignored).is_some_and(|marker| marker.log) {
                    warn!(command = %command, "ignoring error: {}", line);
                }
            }
            warn!(command = %command, ?code, "listing exited with an error, using partial output");
            Ok(stdout)
        }
        other => Err(other),
    }
}
