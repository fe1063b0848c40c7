//! CLI argument parsing module for yarnpack

use crate::packager::PackagerOptions;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Parse a network concurrency value, rejecting zero
fn parse_concurrency(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", s))?;
    if value == 0 {
        return Err("network concurrency must be at least 1".to_string());
    }
    Ok(value)
}

/// Parse a tree depth, rejecting zero
fn parse_depth(s: &str) -> Result<usize, String> {
    let value: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", s))?;
    if value == 0 {
        return Err("depth must be at least 1 (1 prints top-level packages only)".to_string());
    }
    Ok(value)
}

/// Yarn packager adapter for build pipelines
#[derive(Parser, Debug, Clone)]
#[command(
    name = "yarnpack",
    version,
    about = "Yarn packager adapter: dependency graphs, installs and lockfile rebasing"
)]
pub struct CliArgs {
    /// Project directory yarn is run in
    #[arg(long, global = true, default_value = ".")]
    pub cwd: PathBuf,

    /// Configuration file (default: yarnpack.toml in the project directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Enable quiet mode - no spinners, no colors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the production dependency graph
    Deps(GraphArgs),

    /// Parse saved `yarn info --all --recursive --json` output
    ParseTree {
        /// File with the listing, or `-` for stdin
        input: PathBuf,

        #[command(flatten)]
        graph: GraphArgs,
    },

    /// Install dependencies
    Install(InstallArgs),

    /// Prune extraneous dependencies (same as install for yarn)
    Prune(InstallArgs),

    /// Run package scripts in order, stopping at the first failure
    Run {
        /// Script names
        #[arg(required = true)]
        scripts: Vec<String>,
    },

    /// Rebase relative file references in a lockfile
    RebaseLockfile {
        /// Path from the lockfile's new location back to the project root
        path_to_root: String,

        /// Lockfile to read (default: yarn.lock in the project directory)
        #[arg(long)]
        lockfile: Option<PathBuf>,

        /// Rewrite the lockfile in place instead of printing it
        #[arg(long)]
        write: bool,
    },

    /// Print the yarn version
    Version,
}

/// Options for commands printing a graph
#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Only print this many levels of the tree (1 = top-level only)
    #[arg(long, value_parser = parse_depth)]
    pub depth: Option<usize>,
}

/// Options for install and prune
#[derive(Args, Debug, Clone, Default)]
pub struct InstallArgs {
    /// Allow yarn to modify the lockfile
    #[arg(long)]
    pub no_frozen_lockfile: bool,

    /// Do not run lifecycle scripts of installed packages
    #[arg(long)]
    pub ignore_scripts: bool,

    /// Maximum number of concurrent network requests
    #[arg(long, value_parser = parse_concurrency)]
    pub network_concurrency: Option<u32>,
}

impl InstallArgs {
    /// Options given on the command line
    pub fn packager_options(&self) -> PackagerOptions {
        PackagerOptions {
            no_frozen_lockfile: self.no_frozen_lockfile,
            ignore_scripts: self.ignore_scripts,
            network_concurrency: self.network_concurrency,
        }
    }
}
