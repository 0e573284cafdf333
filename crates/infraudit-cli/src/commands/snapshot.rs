//! Snapshot commands
//!
//! Usage:
//!   infraudit snapshot save --inventory <INVENTORY.json>
//!   infraudit snapshot list
//!   infraudit snapshot changes --since <TIMESTAMP> [--until <TIMESTAMP>]

use crate::commands::diff::{render_changes, ChangeFormat};
use crate::commands::emit;
use clap::{Args, Subcommand};
use infraudit_core::diagnostics::TracingSink;
use infraudit_store::snapshot::{parse_timestamp, snapshot_key};
use infraudit_store::{load_inventory, ChangeTracker, FsSnapshotStore, SnapshotStore};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Snapshot directory
    #[arg(long, global = true, default_value = ".infraudit/snapshots")]
    pub snapshots: PathBuf,

    #[command(subcommand)]
    pub command: SnapshotCommand,
}

#[derive(Debug, Subcommand)]
pub enum SnapshotCommand {
    /// Store an inventory as a new snapshot
    Save(SaveArgs),
    /// List stored snapshots, oldest first
    List,
    /// Show changes between two stored snapshots
    Changes(ChangesArgs),
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    #[arg(long)]
    pub inventory: PathBuf,

    /// Snapshot timestamp (RFC 3339); defaults to now
    #[arg(long)]
    pub at: Option<String>,
}

#[derive(Debug, Args)]
pub struct ChangesArgs {
    /// Start snapshot (RFC 3339 or snapshot key)
    #[arg(long)]
    pub since: String,

    /// End snapshot; defaults to the latest stored snapshot
    #[arg(long)]
    pub until: Option<String>,

    #[arg(long, value_enum, default_value = "json")]
    pub format: ChangeFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: SnapshotArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = ChangeTracker::new(FsSnapshotStore::new(&args.snapshots));
    match args.command {
        SnapshotCommand::Save(save_args) => execute_save(&tracker, save_args),
        SnapshotCommand::List => execute_list(&tracker),
        SnapshotCommand::Changes(changes_args) => execute_changes(&tracker, changes_args),
    }
}

fn execute_save(
    tracker: &ChangeTracker<FsSnapshotStore>,
    args: SaveArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let inventory = load_inventory(&args.inventory)?;
    let saved = match args.at {
        Some(at) => tracker.save_snapshot_at(inventory, parse_timestamp(&at)?)?,
        None => tracker.save_snapshot(inventory)?,
    };

    println!("Snapshot saved");
    println!("  timestamp: {}", snapshot_key(saved.timestamp));
    println!("  digest: {}", saved.digest);
    println!(
        "  path: {}",
        tracker.store().path_for(saved.timestamp).display()
    );
    Ok(())
}

fn execute_list(tracker: &ChangeTracker<FsSnapshotStore>) -> Result<(), Box<dyn std::error::Error>> {
    for timestamp in tracker.store().list()? {
        println!("{}\t{}", snapshot_key(timestamp), timestamp.to_rfc3339());
    }
    Ok(())
}

fn execute_changes(
    tracker: &ChangeTracker<FsSnapshotStore>,
    args: ChangesArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let since = parse_timestamp(&args.since)?;
    let until = args.until.as_deref().map(parse_timestamp).transpose()?;

    let changes = tracker.get_changes(since, until, &TracingSink::new())?;
    emit(&render_changes(&changes, args.format)?, args.output.as_deref())
}
