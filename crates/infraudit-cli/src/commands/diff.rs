//! Inventory diff command
//!
//! Usage: infraudit diff --old <A.json> --new <B.json> [--format json|summary]

use crate::commands::emit;
use crate::render;
use clap::{Args, ValueEnum};
use infraudit_core::diagnostics::TracingSink;
use infraudit_core::diff::{ChangeRecord, SnapshotDiffer};
use infraudit_core::{log_op_end, log_op_start};
use infraudit_core_types::RunId;
use infraudit_store::load_inventory;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChangeFormat {
    Json,
    /// Markdown summary for review
    Summary,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Older inventory (or stored snapshot file)
    #[arg(long)]
    pub old: PathBuf,

    /// Newer inventory (or stored snapshot file)
    #[arg(long)]
    pub new: PathBuf,

    #[arg(long, value_enum, default_value = "json")]
    pub format: ChangeFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let run_id = RunId::new();
    log_op_start!("diff", run_id = run_id.as_str());
    let start = Instant::now();

    let old = load_inventory(&args.old)?;
    let new = load_inventory(&args.new)?;
    let changes = SnapshotDiffer::new().diff(&old, &new, &TracingSink::with_run_id(run_id.clone()));

    log_op_end!(
        "diff",
        duration_ms = start.elapsed().as_millis() as u64,
        run_id = run_id.as_str(),
        change_count = changes.len() as u64
    );

    emit(&render_changes(&changes, args.format)?, args.output.as_deref())
}

pub(crate) fn render_changes(
    changes: &[ChangeRecord],
    format: ChangeFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ChangeFormat::Json => render::to_json(changes),
        ChangeFormat::Summary => Ok(render::changes_summary(changes)),
    }
}
