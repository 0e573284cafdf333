//! infraudit CLI
//!
//! Command-line interface for compliance checks and inventory drift

use clap::{Parser, Subcommand};
use infraudit_core::logging_facility::{init, Profile};

mod commands;
mod render;

#[derive(Debug, Parser)]
#[command(name = "infraudit")]
#[command(about = "infraudit - Cloud inventory compliance and drift reporting", long_about = None)]
struct Cli {
    /// Emit JSON logs on stderr
    #[arg(long, global = true)]
    log_json: bool,

    /// Emit human-readable debug logs on stderr
    #[arg(short, long, global = true, conflicts_with = "log_json")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check an inventory against a rule set
    Check(commands::check::CheckArgs),
    /// Compare two inventory files
    Diff(commands::diff::DiffArgs),
    /// Snapshot operations
    Snapshot(commands::snapshot::SnapshotArgs),
}

fn logging_profile(cli: &Cli) -> Option<Profile> {
    if cli.log_json {
        Some(Profile::Production)
    } else if cli.verbose || std::env::var_os("RUST_LOG").is_some() {
        Some(Profile::Development)
    } else {
        None
    }
}

fn main() {
    let cli = Cli::parse();

    if let Some(profile) = logging_profile(&cli) {
        init(profile);
    }

    let result = match cli.command {
        Commands::Check(args) => commands::check::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Snapshot(args) => commands::snapshot::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
