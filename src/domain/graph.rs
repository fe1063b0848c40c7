//! Canonical dependency graph produced from yarn's tree listing

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A package in the dependency graph together with its own dependencies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyNode {
    /// Package name with scope prefix preserved
    pub name: String,
    /// Resolved version; `None` when yarn did not report one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Child dependencies keyed by package name
    #[serde(default)]
    pub dependencies: BTreeMap<String, DependencyNode>,
}

impl DependencyNode {
    /// Creates a node without dependencies
    pub fn new(name: impl Into<String>, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            version,
            dependencies: BTreeMap::new(),
        }
    }

    /// Adds a child dependency (builder pattern)
    pub fn with_dependency(mut self, child: DependencyNode) -> Self {
        self.dependencies.insert(child.name.clone(), child);
        self
    }

    /// Returns the version or a placeholder for display
    pub fn version_or_unknown(&self) -> &str {
        self.version.as_deref().unwrap_or("unknown")
    }

    /// Number of nodes below this one
    pub fn descendant_count(&self) -> usize {
        self.dependencies
            .values()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

/// Root of a production dependency listing
///
/// `problems` is always present and currently always empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    /// Diagnostics reported while listing
    #[serde(default)]
    pub problems: Vec<String>,
    /// Top-level dependencies keyed by package name
    #[serde(default)]
    pub dependencies: BTreeMap<String, DependencyNode>,
}

impl DependencyGraph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a top-level node, replacing any node of the same name
    pub fn insert(&mut self, node: DependencyNode) -> Option<DependencyNode> {
        self.dependencies.insert(node.name.clone(), node)
    }

    /// Looks up a top-level node by package name
    pub fn get(&self, name: &str) -> Option<&DependencyNode> {
        self.dependencies.get(name)
    }

    /// Number of top-level dependencies
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// Returns true if there are no top-level dependencies
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Top-level package names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }

    /// Number of nodes in the whole graph, nested ones included
    pub fn total_count(&self) -> usize {
        self.dependencies
            .values()
            .map(|node| 1 + node.descendant_count())
            .sum()
    }
}
