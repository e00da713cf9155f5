//! # hashgate CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Everything operates directly on a hashstore tree; only `authorize`
//! may touch the network, and only for non-public objects.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hashgate_cli::authorize::{run_authorize, AuthorizeArgs};
use hashgate_cli::resolve::{run_resolve, ResolveArgs};
use hashgate_cli::sysmeta::{run_sysmeta, SysmetaArgs};
use hashgate_core::StoreLayout;

/// Hashstore gateway CLI
///
/// Offline resolution of persistent identifiers against a hashstore
/// tree, plus the same read-authorization check the gateway performs.
#[derive(Parser, Debug)]
#[command(name = "hashgate", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Root of the hashstore (references and metadata).
    #[arg(long, global = true, default_value = "/data/hashstore")]
    store_root: PathBuf,

    /// Object mount root; defaults to <store-root>/objects.
    #[arg(long, global = true)]
    object_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a PID through both reference hops to its object location.
    Resolve(ResolveArgs),

    /// Print the system metadata document (or parsed rules) for a PID.
    Sysmeta(SysmetaArgs),

    /// Evaluate the read-authorization decision for a PID.
    Authorize(AuthorizeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let layout = {
        let layout = StoreLayout::new(&cli.store_root);
        match &cli.object_root {
            Some(root) => layout.with_object_root(root),
            None => layout,
        }
    };
    tracing::debug!(store_root = %layout.root().display(), "hashstore layout resolved");

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to start runtime: {e}");
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Commands::Resolve(args) => runtime.block_on(run_resolve(&args, &layout)),
        Commands::Sysmeta(args) => runtime.block_on(run_sysmeta(&args, &layout)),
        Commands::Authorize(args) => runtime.block_on(run_authorize(&args, &layout)),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
