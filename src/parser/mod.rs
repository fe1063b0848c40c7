//! Parsers for yarn command output
//!
//! This module provides:
//! - Tolerant line-by-line decoding of `yarn info --json` records
//! - Two-pass construction of the canonical dependency graph

mod tree;

pub use tree::{
    build_version_index, decode_lines, DependencyTreeParser, RawChildren, RawTreeLine,
    VersionIndex,
};
