//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// pkger - Dry-run a resource package against platform state.
#[derive(Parser, Debug)]
#[command(name = "pkger")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Organization that owns the package's resources (16 hex characters).
    ///
    /// Overrides `PKGER_ORG_ID`.
    #[arg(long, global = true)]
    pub org_id: Option<String>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show what applying the package would change.
    Diff(DryRunArgs),

    /// Show the fully resolved package.
    Summary(DryRunArgs),
}

/// Inputs shared by dry-run commands.
#[derive(Args, Debug)]
pub struct DryRunArgs {
    /// Path to the package file (YAML or JSON).
    #[arg(short, long, env = "PKGER_PACKAGE")]
    pub package: PathBuf,

    /// Path to a JSON platform snapshot.
    #[arg(long, env = "PKGER_PLATFORM")]
    pub platform: PathBuf,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_diff_command() {
        let cli = Cli::try_parse_from([
            "pkger",
            "diff",
            "--package",
            "pkg.yml",
            "--platform",
            "platform.json",
            "--output",
            "json",
        ])
        .unwrap();

        assert!(matches!(cli.output, OutputFormat::Json));
        match cli.command {
            Commands::Diff(args) => {
                assert_eq!(args.package, PathBuf::from("pkg.yml"));
                assert_eq!(args.platform, PathBuf::from("platform.json"));
            }
            Commands::Summary(_) => panic!("expected diff command"),
        }
    }
}
