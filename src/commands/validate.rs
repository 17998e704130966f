use anyhow::Result;
use tracing::info;

use crate::cli::ValidateArgs;
use crate::commands::brand_workspace;
use crate::context::ValidationContext;
use crate::engine::ValidationEngine;
use crate::fixes::FixTracker;
use crate::model::BrandStrategy;
use crate::util::{read_json, write_json_pretty};

pub fn run(args: ValidateArgs) -> Result<()> {
    let strategy: BrandStrategy = read_json(&args.strategy_path)?;
    let context: Option<ValidationContext> = match &args.context_path {
        Some(path) => Some(read_json(path)?),
        None => None,
    };

    let workspace = brand_workspace(&args.workspace_root, &args.brand)?;
    let tracker = FixTracker::open(&workspace)?;
    let tracked_fixes = tracker.load_fixes()?;

    let engine = ValidationEngine::new()?;
    let mut report =
        engine.validate_with_fixes(&strategy, &args.brand, context.as_ref(), tracked_fixes);

    if args.track_gaps {
        let created = tracker.create_fixes_from_gaps(&report.gaps)?;
        info!(created = created.len(), "tracked gaps as fixes");
        // Reflect the newly created fixes in the written report.
        report.fixes = tracker.load_fixes()?;
    }

    let report_path = args
        .report_path
        .clone()
        .unwrap_or_else(|| workspace.join("validation_report.json"));
    write_json_pretty(&report_path, &report)?;

    info!(
        brand = %report.brand_name,
        overall_score = report.overall_score,
        passed = report.summary.passed,
        warnings = report.summary.warnings,
        failed = report.summary.failed,
        skipped = report.summary.skipped,
        critical_issues = report.summary.critical_issues,
        gaps = report.gaps.len(),
        report = %report_path.display(),
        "validation complete"
    );
    if let Some(top) = report.gaps.first() {
        info!(
            gap = %top.id,
            severity = %top.severity,
            priority = top.priority,
            "highest priority gap"
        );
    }

    Ok(())
}
