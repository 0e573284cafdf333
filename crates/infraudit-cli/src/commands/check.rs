//! Compliance check command
//!
//! Usage: infraudit check --rules <RULES.yaml> --inventory <INVENTORY.json> [--format json|html]

use crate::commands::emit;
use crate::render;
use clap::{Args, ValueEnum};
use infraudit_core::compliance::ComplianceEngine;
use infraudit_core::diagnostics::TracingSink;
use infraudit_core::errors::ExError;
use infraudit_core::{log_op_end, log_op_start};
use infraudit_core_types::RunContext;
use infraudit_store::{load_inventory, load_rule_set};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Json,
    Html,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// YAML rule set
    #[arg(long)]
    pub rules: PathBuf,

    /// JSON inventory (or a stored snapshot file)
    #[arg(long)]
    pub inventory: PathBuf,

    #[arg(long, value_enum, default_value = "json")]
    pub format: ReportFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit non-zero when any resource is non-compliant
    #[arg(long)]
    pub fail_on_violation: bool,
}

pub fn execute(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RunContext::new().with_label(args.rules.display().to_string());
    let run_label = ctx.label.as_deref().unwrap_or_default();
    log_op_start!("check", run_id = ctx.run_id.as_str(), run_label = run_label);
    let start = Instant::now();

    let rule_set = load_rule_set(&args.rules)?;
    let inventory = load_inventory(&args.inventory)?;
    let engine = ComplianceEngine::new(&rule_set).map_err(ExError::from)?;

    let sink = TracingSink::for_run(&ctx);
    let report = engine.check(&inventory, &sink);

    log_op_end!(
        "check",
        duration_ms = start.elapsed().as_millis() as u64,
        run_id = ctx.run_id.as_str(),
        resource_count = report.summary.total_resources as u64
    );

    let rendered = match args.format {
        ReportFormat::Json => render::to_json(&report)?,
        ReportFormat::Html => render::report_html(&report),
    };
    emit(&rendered, args.output.as_deref())?;

    if args.fail_on_violation && !report.is_compliant() {
        return Err(format!(
            "{} of {} resources are non-compliant",
            report.summary.non_compliant, report.summary.total_resources
        )
        .into());
    }
    Ok(())
}
