//! Parser for `yarn info --all --recursive --json` output
//!
//! Yarn prints one JSON record per line, possibly interleaved with
//! diagnostics. Each record looks like:
//!
//! ```json
//! {"value":"debug@npm:4.3.4","children":{"Version":"4.3.4","Dependencies":[{"descriptor":"ms@npm:2.1.2","locator":"ms@npm:2.1.2"}]}}
//! ```
//!
//! The graph is built in two passes: first a version index keyed by the
//! full locator of every top-level record, then the nested structure, which
//! looks versions up in that index.

use crate::domain::{package_name, DependencyGraph, DependencyNode};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Locator string to resolved version
pub type VersionIndex = HashMap<String, String>;

/// One record of the recursive listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTreeLine {
    /// Locator of a top-level record
    #[serde(default)]
    pub value: Option<String>,
    /// Locator of a nested dependency record
    #[serde(default)]
    pub locator: Option<String>,
    #[serde(default)]
    pub children: Option<RawChildren>,
}

/// The `children` object of a record
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChildren {
    #[serde(rename = "Version", default)]
    pub version: Option<String>,
    /// Nested records; `null`, non-arrays and malformed elements are dropped
    #[serde(rename = "Dependencies", default, deserialize_with = "lenient_records")]
    pub dependencies: Vec<RawTreeLine>,
}

impl RawTreeLine {
    fn is_empty(&self) -> bool {
        self.value.is_none() && self.locator.is_none() && self.children.is_none()
    }
}

fn lenient_records<'de, D>(deserializer: D) -> Result<Vec<RawTreeLine>, D::Error>
where
    D: Deserializer<'de>,
{
    let records = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<RawTreeLine>(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!(error = %e, "skipping unexpected nested tree record");
                    None
                }
            })
            .collect(),
        Value::Null => Vec::new(),
        other => {
            debug!(dependencies = %other, "ignoring non-array dependencies");
            Vec::new()
        }
    };
    Ok(records)
}

/// Which field carries the locator at a given depth
#[derive(Debug, Clone, Copy)]
enum LocatorField {
    Value,
    Locator,
}

impl LocatorField {
    fn get(self, line: &RawTreeLine) -> Option<&str> {
        match self {
            LocatorField::Value => line.value.as_deref(),
            LocatorField::Locator => line.locator.as_deref(),
        }
    }
}

/// Converts yarn's tree listing into a [`DependencyGraph`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyTreeParser;

impl DependencyTreeParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse raw listing output into a dependency graph
    ///
    /// Lines that are empty, not JSON, or not a non-empty record are
    /// skipped. A dependency whose version is not in the index is kept with
    /// `version: None`.
    pub fn parse(&self, raw_output: &str) -> DependencyGraph {
        let entries = decode_lines(raw_output);
        let index = build_version_index(&entries);

        DependencyGraph {
            problems: Vec::new(),
            dependencies: build_level(&entries, LocatorField::Value, &index),
        }
    }
}

/// Decode every line independently, dropping the ones that are not records
pub fn decode_lines(raw_output: &str) -> Vec<RawTreeLine> {
    raw_output
        .lines()
        .enumerate()
        .filter_map(|(line_no, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return None;
            }
            match serde_json::from_str::<RawTreeLine>(trimmed) {
                Ok(entry) if !entry.is_empty() => Some(entry),
                Ok(_) => {
                    debug!(line = line_no + 1, "skipping empty tree record");
                    None
                }
                Err(e) => {
                    debug!(line = line_no + 1, error = %e, "skipping non-record tree line");
                    None
                }
            }
        })
        .collect()
}

/// First pass: map each top-level `value` to its `children.Version`
pub fn build_version_index(entries: &[RawTreeLine]) -> VersionIndex {
    entries
        .iter()
        .filter_map(|entry| {
            let value = entry.value.as_ref()?;
            let version = entry.children.as_ref()?.version.as_ref()?;
            Some((value.clone(), version.clone()))
        })
        .collect()
}

/// Second pass: build one level of the graph, recursing into children
fn build_level(
    entries: &[RawTreeLine],
    field: LocatorField,
    index: &VersionIndex,
) -> BTreeMap<String, DependencyNode> {
    let mut level = BTreeMap::new();

    for entry in entries {
        let Some(raw_locator) = field.get(entry) else {
            debug!(?field, "skipping tree record without locator");
            continue;
        };

        let name = package_name(raw_locator);
        let dependencies = match &entry.children {
            Some(children) if !children.dependencies.is_empty() => {
                build_level(&children.dependencies, LocatorField::Locator, index)
            }
            _ => BTreeMap::new(),
        };

        let node = DependencyNode {
            name: name.to_string(),
            version: index.get(raw_locator).cloned(),
            dependencies,
        };
        level.insert(name.to_string(), node);
    }

    level
}
