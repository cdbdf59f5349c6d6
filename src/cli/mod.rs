//! CLI module for the pkger tool.
//!
//! This module provides the command-line interface for dry-running
//! resource packages.

mod commands;
mod output;

pub use commands::{Cli, Commands, DryRunArgs, OutputFormat};
pub use output::OutputFormatter;
