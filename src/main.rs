//! pkger CLI entrypoint.
//!
//! This is the main entrypoint for the pkger command-line tool.

use std::io::Write;
use std::process::ExitCode;

use pkger::cli::{Cli, Commands, DryRunArgs, OutputFormatter};
use pkger::error::Result;
use pkger::package::PackageParser;
use pkger::pkg::Pkg;
use pkger::planner::{summarize, Diff, Resolver};
use pkger::platform::{PlatformId, SnapshotPlatform};

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    // Load .env before parsing so it can supply argument defaults
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse_args();

    // Initialize logging
    init_logging(cli.verbose);

    match dotenv {
        Ok(path) => debug!("Loaded environment from: {}", path.display()),
        Err(e) => debug!(".env not loaded: {e}"),
    }

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.output);

    let mut parser = PackageParser::new().apply_env_overrides()?;
    if let Some(raw) = &cli.org_id {
        let org_id: PlatformId = raw.parse()?;
        parser = parser.with_org_id(org_id);
    }

    let rendered = match cli.command {
        Commands::Diff(args) => {
            let (_, diff) = dry_run(&parser, &args).await?;
            formatter.format_diff(&diff)
        }
        Commands::Summary(args) => {
            let (pkg, _) = dry_run(&parser, &args).await?;
            formatter.format_summary(&summarize(&pkg))
        }
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Loads the package and platform snapshot and resolves one against the other.
async fn dry_run(parser: &PackageParser, args: &DryRunArgs) -> Result<(Pkg, Diff)> {
    let mut pkg = parser.load_file(&args.package)?;
    let platform = SnapshotPlatform::load(&args.platform).await?;

    let diff = Resolver::new(&platform).dry_run(&mut pkg).await?;
    info!(
        "Resolved package '{}' (org {})",
        pkg.metadata.name,
        parser.org_id()
    );

    Ok((pkg, diff))
}
