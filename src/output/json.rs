//! JSON output formatter for machine processing
//!
//! Writes the graph in the packager interface shape:
//! `{"problems": [], "dependencies": {"name": {"name", "version", "dependencies"}}}`

use crate::domain::DependencyGraph;
use crate::output::OutputFormatter;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, graph: &DependencyGraph, writer: &mut dyn Write) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, graph)?;
        writeln!(writer)
    }
}
