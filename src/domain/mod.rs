//! Core domain models for yarnpack
//!
//! This module contains the fundamental types used throughout the application:
//! - Package name extraction from yarn locators
//! - The canonical dependency graph handed to the build pipeline

mod graph;
mod locator;

pub use graph::{DependencyGraph, DependencyNode};
pub use locator::package_name;
