//! yarnpack - Yarn packager adapter CLI
//!
//! Exposes the packager operations used by build pipelines:
//! - Production dependency graph listing
//! - install / prune
//! - Sequential package scripts
//! - yarn.lock rebasing

use anyhow::Context;
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;
use yarnpack::cli::{CliArgs, Command, GraphArgs};
use yarnpack::config::{discover_config, load_config_from_path, ConfigFile};
use yarnpack::domain::DependencyGraph;
use yarnpack::lockfile::LOCKFILE_NAME;
use yarnpack::logging;
use yarnpack::output::{create_formatter, OutputConfig};
use yarnpack::packager::YarnPackager;
use yarnpack::parser::DependencyTreeParser;
use yarnpack::progress::Progress;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    logging::init(args.verbose, args.log_json);

    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load the configuration file, explicit or discovered
fn load_config(args: &CliArgs) -> anyhow::Result<ConfigFile> {
    let config = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => discover_config(&args.cwd)?.unwrap_or_default(),
    };
    Ok(config)
}

fn print_graph(graph: &DependencyGraph, options: &GraphArgs, color: bool) -> anyhow::Result<()> {
    let formatter = create_formatter(OutputConfig::from_cli(options.json, options.depth, color));
    let mut stdout = io::stdout().lock();
    formatter.format(graph, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read listing from stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let config = load_config(&args)?;
    let packager = YarnPackager::system().with_ignored_errors(config.ignored_errors.clone());
    let color = !args.quiet;
    let mut progress = Progress::new(!args.quiet);

    match &args.command {
        Command::Deps(graph_args) => {
            progress.spinner("Listing production dependencies...");
            let result = packager.list_prod_dependencies(&args.cwd);
            progress.finish_and_clear();
            print_graph(&result?, graph_args, color)?;
        }
        Command::ParseTree { input, graph } => {
            let raw = read_input(input)?;
            let parsed = DependencyTreeParser::new().parse(&raw);
            print_graph(&parsed, graph, color)?;
        }
        Command::Install(install) | Command::Prune(install) => {
            let options = config
                .packager_options()
                .merged_with(&install.packager_options());
            progress.spinner("Installing dependencies...");
            if let Err(e) = packager.install(&args.cwd, &options) {
                progress.finish_and_clear();
                return Err(e.into());
            }
            progress.finish("Dependencies installed");
        }
        Command::Run { scripts } => {
            packager.run_scripts(&args.cwd, scripts.as_slice())?;
        }
        Command::RebaseLockfile {
            path_to_root,
            lockfile,
            write,
        } => {
            let lockfile_path = lockfile
                .clone()
                .unwrap_or_else(|| args.cwd.join(LOCKFILE_NAME));
            if *write {
                let changed = packager.rebase_lockfile_file(path_to_root, &lockfile_path)?;
                if !args.quiet {
                    let state = if changed { "rebased" } else { "unchanged" };
                    eprintln!("{}: {}", lockfile_path.display(), state);
                }
            } else {
                let original = fs::read_to_string(&lockfile_path)
                    .with_context(|| format!("Failed to read {}", lockfile_path.display()))?;
                let mut stdout = io::stdout().lock();
                stdout.write_all(packager.rebase_lockfile(path_to_root, &original).as_bytes())?;
                stdout.flush()?;
            }
        }
        Command::Version => {
            println!("{}", packager.packager_version(&args.cwd)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
