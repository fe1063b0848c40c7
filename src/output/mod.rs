//! Output formatting for dependency graphs
//!
//! This module provides:
//! - Text output as a coloured tree for human-readable display
//! - JSON output for machine processing

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::domain::DependencyGraph;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable tree output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Maximum tree depth to print; `None` prints everything
    pub depth: Option<usize>,
    /// Whether to use colors (when supported)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            depth: None,
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, depth: Option<usize>, color: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Self {
            format,
            depth,
            color,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write a dependency graph
    fn format(&self, graph: &DependencyGraph, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create a formatter for the given configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(config.depth, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DependencyNode;

    #[test]
    fn test_output_config_from_cli() {
        let config = OutputConfig::from_cli(true, None, false);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.color);

        let config = OutputConfig::from_cli(false, Some(1), true);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.depth, Some(1));
    }

    #[test]
    fn test_create_formatter_json() {
        let mut graph = DependencyGraph::new();
        graph.insert(DependencyNode::new("lodash", Some("4.17.21".to_string())));

        let formatter = create_formatter(OutputConfig::from_cli(true, None, false));
        let mut buf = Vec::new();
        formatter.format(&graph, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["dependencies"]["lodash"]["version"], "4.17.21");
    }

    #[test]
    fn test_create_formatter_text() {
        let mut graph = DependencyGraph::new();
        graph.insert(DependencyNode::new("lodash", Some("4.17.21".to_string())));

        let formatter = create_formatter(OutputConfig::from_cli(false, None, false));
        let mut buf = Vec::new();
        formatter.format(&graph, &mut buf).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("lodash 4.17.21"));
    }
}
