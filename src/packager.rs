//! Yarn packager adapter
//!
//! This module provides the uniform packager interface used by the build
//! pipeline:
//! - Production dependency listing as a [`DependencyGraph`]
//! - `install` / `prune` with flag translation from [`PackagerOptions`]
//! - Sequential package script execution
//! - Lockfile rebasing for relocated lockfiles

use crate::domain::DependencyGraph;
use crate::error::{IoError, PackagerError};
use crate::lockfile::{LockfileRebaser, LOCKFILE_NAME};
use crate::parser::DependencyTreeParser;
use crate::process::{ProcessRunner, SystemProcessRunner};
use crate::recovery::{recover_listing, IgnoredError};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// package.json sections the packaging step must copy verbatim
pub const COPY_PACKAGE_SECTION_NAMES: &[&str] = &["resolutions"];

/// Yarn resolves local modules itself, so they need not be copied
pub const MUST_COPY_MODULES: bool = false;

/// Options recognised by `install` and `prune`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackagerOptions {
    /// Allow yarn to update the lockfile
    pub no_frozen_lockfile: bool,
    /// Skip lifecycle scripts of installed packages
    pub ignore_scripts: bool,
    /// Upper bound on concurrent network requests
    pub network_concurrency: Option<u32>,
}

impl PackagerOptions {
    /// Overlay `other` on top of these options
    ///
    /// Flags set in either are kept; a concurrency in `other` wins.
    pub fn merged_with(&self, other: &PackagerOptions) -> PackagerOptions {
        PackagerOptions {
            no_frozen_lockfile: self.no_frozen_lockfile || other.no_frozen_lockfile,
            ignore_scripts: self.ignore_scripts || other.ignore_scripts,
            network_concurrency: other.network_concurrency.or(self.network_concurrency),
        }
    }

    /// Arguments for `yarn install`
    pub fn install_args(&self) -> Vec<String> {
        let mut args = vec!["install".to_string()];
        if !self.no_frozen_lockfile {
            args.push("--frozen-lockfile".to_string());
        }
        if self.ignore_scripts {
            args.push("--ignore-scripts".to_string());
        }
        if let Some(concurrency) = self.network_concurrency {
            args.push("--network-concurrency".to_string());
            args.push(concurrency.to_string());
        }
        args
    }
}

/// Name of the yarn executable on this platform
pub fn yarn_command() -> &'static str {
    if cfg!(windows) {
        "yarn.cmd"
    } else {
        "yarn"
    }
}

fn listing_args() -> Vec<String> {
    ["info", "--all", "--recursive", "--json"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Packager backed by the yarn CLI
pub struct YarnPackager<R = SystemProcessRunner> {
    runner: R,
    ignored_errors: Vec<IgnoredError>,
    parser: DependencyTreeParser,
    rebaser: LockfileRebaser,
}

impl YarnPackager<SystemProcessRunner> {
    /// Create a packager that runs the real yarn binary
    pub fn system() -> Self {
        Self::new(SystemProcessRunner::new())
    }
}

impl<R: ProcessRunner> YarnPackager<R> {
    /// Create a packager with a custom process runner
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            ignored_errors: Vec::new(),
            parser: DependencyTreeParser::new(),
            rebaser: LockfileRebaser::new(),
        }
    }

    /// Set the stderr markers that do not invalidate a listing (builder pattern)
    pub fn with_ignored_errors(mut self, ignored_errors: Vec<IgnoredError>) -> Self {
        self.ignored_errors = ignored_errors;
        self
    }

    /// Name of the lockfile this packager maintains
    pub fn lockfile_name(&self) -> &'static str {
        LOCKFILE_NAME
    }

    /// package.json sections to copy verbatim
    pub fn copy_package_section_names(&self) -> &'static [&'static str] {
        COPY_PACKAGE_SECTION_NAMES
    }

    /// Whether local modules must be copied by the packaging step
    pub fn must_copy_modules(&self) -> bool {
        MUST_COPY_MODULES
    }

    fn yarn(&self, args: Vec<String>, cwd: &Path) -> Result<String, PackagerError> {
        debug!(cwd = %cwd.display(), ?args, "running yarn");
        self.runner
            .run(yarn_command(), &args, cwd)
            .map(|output| output.stdout)
    }

    /// Version reported by `yarn --version`
    pub fn packager_version(&self, cwd: &Path) -> Result<String, PackagerError> {
        let stdout = self.yarn(vec!["--version".to_string()], cwd)?;
        Ok(stdout.trim().to_string())
    }

    /// List the production dependencies of the project in `cwd`
    ///
    /// A listing that exits non-zero is still used when its failure is
    /// benign (see [`crate::recovery::is_benign_failure`]).
    pub fn list_prod_dependencies(&self, cwd: &Path) -> Result<DependencyGraph, PackagerError> {
        let stdout = match self.yarn(listing_args(), cwd) {
            Ok(stdout) => stdout,
            Err(err) => recover_listing(err, &self.ignored_errors)?,
        };

        let graph = self.parser.parse(&stdout);
        debug!(
            top_level = graph.len(),
            total = graph.total_count(),
            "parsed dependency listing"
        );
        Ok(graph)
    }

    /// Install dependencies in `cwd`
    pub fn install(&self, cwd: &Path, options: &PackagerOptions) -> Result<(), PackagerError> {
        info!(cwd = %cwd.display(), "installing dependencies");
        self.yarn(options.install_args(), cwd).map(|_| ())
    }

    /// Remove extraneous packages; yarn does this as part of install
    pub fn prune(&self, cwd: &Path, options: &PackagerOptions) -> Result<(), PackagerError> {
        self.install(cwd, options)
    }

    /// Run package scripts one after another, stopping at the first failure
    pub fn run_scripts<S: AsRef<str>>(
        &self,
        cwd: &Path,
        script_names: &[S],
    ) -> Result<(), PackagerError> {
        for script in script_names {
            let script = script.as_ref();
            info!(script, cwd = %cwd.display(), "running script");
            self.yarn(vec!["run".to_string(), script.to_string()], cwd)
                .map_err(|e| PackagerError::script_execution(script, e))?;
        }
        Ok(())
    }

    /// Rebase relative file references in lockfile text onto `path_to_root`
    pub fn rebase_lockfile(&self, path_to_root: &str, lockfile: &str) -> String {
        self.rebaser.rebase(lockfile, path_to_root)
    }

    /// Rebase a lockfile on disk in place
    ///
    /// Returns true if the file content changed.
    pub fn rebase_lockfile_file(
        &self,
        path_to_root: &str,
        lockfile_path: &Path,
    ) -> Result<bool, PackagerError> {
        let original = fs::read_to_string(lockfile_path)
            .map_err(|e| IoError::read_error(lockfile_path, e))?;
        let rebased = self.rebase_lockfile(path_to_root, &original);
        if rebased == original {
            return Ok(false);
        }

        fs::write(lockfile_path, &rebased).map_err(|e| IoError::write_error(lockfile_path, e))?;
        debug!(path = %lockfile_path.display(), "rewrote lockfile");
        Ok(true)
    }
}
