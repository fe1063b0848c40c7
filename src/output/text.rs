//! Text output formatter for human-readable display
//!
//! Renders the graph as a tree:
//!
//! ```text
//! ├── @scope/a 1.0.0
//! │   └── b 2.0.0
//! └── c (unresolved)
//!
//! 3 packages (2 top-level)
//! ```

use crate::domain::{DependencyGraph, DependencyNode};
use crate::output::OutputFormatter;
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::Write;

/// Text formatter with optional colors
pub struct TextFormatter {
    /// Maximum depth to print, counting the top level as 1
    depth: Option<usize>,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(depth: Option<usize>, color: bool) -> Self {
        Self { depth, color }
    }

    fn node_label(&self, node: &DependencyNode) -> String {
        match (&node.version, self.color) {
            (Some(version), true) => format!("{} {}", node.name.bold(), version.green()),
            (Some(version), false) => format!("{} {}", node.name, version),
            (None, true) => format!("{} {}", node.name.bold(), "(unresolved)".dimmed()),
            (None, false) => format!("{} (unresolved)", node.name),
        }
    }

    fn write_level(
        &self,
        nodes: &BTreeMap<String, DependencyNode>,
        prefix: &str,
        level: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let count = nodes.len();
        for (i, node) in nodes.values().enumerate() {
            let last = i + 1 == count;
            let branch = if last { "└── " } else { "├── " };
            writeln!(writer, "{}{}{}", prefix, branch, self.node_label(node))?;

            if self.depth.is_some_and(|max| level + 1 >= max) {
                continue;
            }
            let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
            self.write_level(&node.dependencies, &child_prefix, level + 1, writer)?;
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, graph: &DependencyGraph, writer: &mut dyn Write) -> std::io::Result<()> {
        if graph.is_empty() {
            let msg = "No production dependencies.";
            if self.color {
                writeln!(writer, "{}", msg.dimmed())?;
            } else {
                writeln!(writer, "{}", msg)?;
            }
            return Ok(());
        }

        self.write_level(&graph.dependencies, "", 0, writer)?;

        let summary = format!(
            "{} packages ({} top-level)",
            graph.total_count(),
            graph.len()
        );
        writeln!(writer)?;
        if self.color {
            writeln!(writer, "{}", summary.cyan())
        } else {
            writeln!(writer, "{}", summary)
        }
    }
}
