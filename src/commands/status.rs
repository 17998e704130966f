use anyhow::Result;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::commands::brand_workspace;
use crate::fixes::FixTracker;

pub fn run(args: StatusArgs) -> Result<()> {
    let workspace = brand_workspace(&args.workspace_root, &args.brand)?;
    let tracker = FixTracker::open(&workspace)?;

    info!(brand = %args.brand, workspace = %workspace.display(), "status requested");

    if !tracker.fixes_path().exists() {
        warn!(path = %tracker.fixes_path().display(), "no fixes tracked for this brand yet");
        return Ok(());
    }

    let fixes = tracker.load_fixes()?;
    let by_status = tracker.counts_by_status()?;
    let by_effort = tracker.counts_by_effort()?;
    let log_entries = tracker.load_log()?.len();

    info!(
        total_fixes = fixes.len(),
        identified = by_status.get("identified").copied().unwrap_or(0),
        in_progress = by_status.get("in_progress").copied().unwrap_or(0),
        resolved = by_status.get("resolved").copied().unwrap_or(0),
        verified = by_status.get("verified").copied().unwrap_or(0),
        wont_fix = by_status.get("wont_fix").copied().unwrap_or(0),
        effort_low = by_effort.get("low").copied().unwrap_or(0),
        effort_medium = by_effort.get("medium").copied().unwrap_or(0),
        effort_high = by_effort.get("high").copied().unwrap_or(0),
        log_entries,
        "fix workspace summary"
    );

    Ok(())
}
