//! yarnpack - Yarn packager adapter library
//!
//! This library adapts the yarn CLI to the packager interface of a build
//! pipeline:
//! - Production dependency graphs from `yarn info --recursive --json`
//! - install / prune with flag translation
//! - Sequential package script execution
//! - yarn.lock rebasing for relocated lockfiles

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod lockfile;
pub mod logging;
pub mod output;
pub mod packager;
pub mod parser;
pub mod process;
pub mod progress;
pub mod recovery;
