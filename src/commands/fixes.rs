use anyhow::{Context, Result};
use tracing::info;

use crate::cli::{FixListArgs, FixNoteArgs, FixUpdateArgs, FixesCommand};
use crate::commands::brand_workspace;
use crate::fixes::FixTracker;
use crate::model::QualityFix;

pub fn run(command: FixesCommand) -> Result<()> {
    match command {
        FixesCommand::List(args) => list(args),
        FixesCommand::Update(args) => update(args),
        FixesCommand::Note(args) => note(args),
    }
}

fn list(args: FixListArgs) -> Result<()> {
    let workspace = brand_workspace(&args.workspace_root, &args.brand)?;
    let tracker = FixTracker::open(&workspace)?;

    let fixes: Vec<QualityFix> = match (&args.status, &args.checkpoint) {
        (Some(status), None) => tracker.fixes_with_status((*status).into())?,
        (None, Some(checkpoint)) => tracker.fixes_for_checkpoint(checkpoint)?,
        (None, None) => tracker.load_fixes()?,
        (Some(status), Some(checkpoint)) => {
            let by_status = tracker.fixes_with_status((*status).into())?;
            by_status
                .into_iter()
                .filter(|fix| fix.checkpoints.iter().any(|id| id == checkpoint))
                .collect()
        }
    };

    let rendered =
        serde_json::to_string_pretty(&fixes).context("failed to serialize fix list")?;
    println!("{rendered}");
    Ok(())
}

fn update(args: FixUpdateArgs) -> Result<()> {
    let workspace = brand_workspace(&args.workspace_root, &args.brand)?;
    let tracker = FixTracker::open(&workspace)?;
    let updated = tracker.update_fix_status(&args.fix_id, args.status.into(), args.note.as_deref())?;

    info!(
        fix_id = %updated.id,
        status = updated.status.as_str(),
        resolved_at = %updated.resolved_at.clone().unwrap_or_default(),
        "fix status updated"
    );
    Ok(())
}

fn note(args: FixNoteArgs) -> Result<()> {
    let workspace = brand_workspace(&args.workspace_root, &args.brand)?;
    let tracker = FixTracker::open(&workspace)?;
    let updated = tracker.add_note(&args.fix_id, &args.note, args.author.as_deref())?;

    info!(
        fix_id = %updated.id,
        notes = updated.notes.len(),
        "note added to fix"
    );
    Ok(())
}
