use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::model::{FixAction, FixLogEntry, FixStatus, QualityFix, StrategyGap};
use crate::util::{append_json_line, ensure_directory, now_utc_string, read_json, write_json_pretty};

pub const FIXES_FILE: &str = "fixes.json";
pub const FIX_LOG_FILE: &str = "fix_log.jsonl";

/// Persistent CRUD surface over `QualityFix`, scoped to one brand workspace.
/// Two files: `fixes.json` holds current state and is rewritten wholesale per
/// mutation; `fix_log.jsonl` is an append-only history. Mutations are full
/// read-modify-write with no locking: concurrent mutators on the same
/// workspace race last-writer-wins.
pub struct FixTracker {
    fixes_path: PathBuf,
    log_path: PathBuf,
}

impl FixTracker {
    /// Explicit constructor; creates the workspace directory up front so no
    /// later call does hidden first-use setup.
    pub fn open(workspace_dir: &Path) -> Result<Self> {
        ensure_directory(workspace_dir)?;
        Ok(Self {
            fixes_path: workspace_dir.join(FIXES_FILE),
            log_path: workspace_dir.join(FIX_LOG_FILE),
        })
    }

    pub fn fixes_path(&self) -> &Path {
        &self.fixes_path
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Whole-array read. A missing file is an empty list, not an error.
    pub fn load_fixes(&self) -> Result<Vec<QualityFix>> {
        if !self.fixes_path.exists() {
            return Ok(Vec::new());
        }
        read_json(&self.fixes_path)
    }

    /// Whole-array write. Failure here is fatal: the fix list is the source
    /// of truth.
    pub fn save_fixes(&self, fixes: &[QualityFix]) -> Result<()> {
        write_json_pretty(&self.fixes_path, &fixes)
    }

    /// Creates one fix per gap that does not already have one (idempotent per
    /// gap id). Returns only the newly created fixes.
    pub fn create_fixes_from_gaps(&self, gaps: &[StrategyGap]) -> Result<Vec<QualityFix>> {
        let mut fixes = self.load_fixes()?;
        let tracked: HashSet<String> = fixes.iter().map(|fix| fix.gap_id.clone()).collect();

        let mut created = Vec::new();
        for gap in gaps {
            if tracked.contains(&gap.id) || created.iter().any(|fix: &QualityFix| fix.gap_id == gap.id) {
                continue;
            }
            let now = now_utc_string();
            created.push(QualityFix {
                id: fix_id_for_gap(&gap.id),
                gap_id: gap.id.clone(),
                title: gap.title.clone(),
                description: gap.description.clone(),
                status: FixStatus::Identified,
                created_at: now.clone(),
                updated_at: now,
                resolved_at: None,
                effort: gap.effort,
                checkpoints: gap.related_checkpoints.clone(),
                notes: gap.recommendations.clone(),
                assignee: None,
            });
        }

        if created.is_empty() {
            return Ok(created);
        }

        fixes.extend(created.iter().cloned());
        self.save_fixes(&fixes)?;
        for fix in &created {
            self.append_log(
                &fix.id,
                FixAction::Created,
                format!("fix created from gap {}", fix.gap_id),
                None,
            );
        }
        info!(created = created.len(), total = fixes.len(), "fixes created from gaps");
        Ok(created)
    }

    /// Moves a fix to a new status. Stamps `resolved_at` the first time the
    /// fix reaches resolved/verified; later transitions leave it untouched.
    pub fn update_fix_status(
        &self,
        fix_id: &str,
        status: FixStatus,
        note: Option<&str>,
    ) -> Result<QualityFix> {
        let mut fixes = self.load_fixes()?;
        let Some(fix) = fixes.iter_mut().find(|fix| fix.id == fix_id) else {
            bail!("fix not found: {fix_id}");
        };

        let old_status = fix.status;
        let now = now_utc_string();
        fix.status = status;
        fix.updated_at = now.clone();
        if status.is_resolution() && fix.resolved_at.is_none() {
            fix.resolved_at = Some(now);
        }
        if let Some(note) = note {
            fix.notes.push(note.to_string());
        }
        let updated = fix.clone();

        self.save_fixes(&fixes)?;
        self.append_log(
            fix_id,
            FixAction::StatusChanged,
            format!("status changed from {old_status} to {status}"),
            None,
        );
        if let Some(note) = note {
            self.append_log(fix_id, FixAction::NoteAdded, note.to_string(), None);
        }
        Ok(updated)
    }

    pub fn add_note(&self, fix_id: &str, note: &str, author: Option<&str>) -> Result<QualityFix> {
        let mut fixes = self.load_fixes()?;
        let Some(fix) = fixes.iter_mut().find(|fix| fix.id == fix_id) else {
            bail!("fix not found: {fix_id}");
        };

        fix.notes.push(note.to_string());
        fix.updated_at = now_utc_string();
        let updated = fix.clone();

        self.save_fixes(&fixes)?;
        self.append_log(
            fix_id,
            FixAction::NoteAdded,
            note.to_string(),
            author.map(str::to_string),
        );
        Ok(updated)
    }

    pub fn fixes_with_status(&self, status: FixStatus) -> Result<Vec<QualityFix>> {
        Ok(self
            .load_fixes()?
            .into_iter()
            .filter(|fix| fix.status == status)
            .collect())
    }

    pub fn fixes_for_checkpoint(&self, checkpoint_id: &str) -> Result<Vec<QualityFix>> {
        Ok(self
            .load_fixes()?
            .into_iter()
            .filter(|fix| fix.checkpoints.iter().any(|id| id == checkpoint_id))
            .collect())
    }

    pub fn counts_by_status(&self) -> Result<BTreeMap<String, usize>> {
        let mut counts = BTreeMap::new();
        for fix in self.load_fixes()? {
            *counts.entry(fix.status.as_str().to_string()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    pub fn counts_by_effort(&self) -> Result<BTreeMap<String, usize>> {
        let mut counts = BTreeMap::new();
        for fix in self.load_fixes()? {
            *counts.entry(fix.effort.as_str().to_string()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Reads the full audit history. Missing log means no history yet.
    pub fn load_log(&self) -> Result<Vec<FixLogEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.log_path)
            .with_context(|| format!("failed to read fix log: {}", self.log_path.display()))?;
        let mut entries = Vec::new();
        for line in raw.lines().filter(|line| !line.trim().is_empty()) {
            let entry: FixLogEntry = serde_json::from_str(line).with_context(|| {
                format!("failed to parse fix log line in {}", self.log_path.display())
            })?;
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Best-effort audit append. The log is diagnostic, not the source of
    /// truth, so a write failure is downgraded to a warning and never rolls
    /// back the primary fix-list write.
    fn append_log(&self, fix_id: &str, action: FixAction, description: String, author: Option<String>) {
        let entry = FixLogEntry {
            timestamp: now_utc_string(),
            fix_id: fix_id.to_string(),
            action,
            description,
            author,
        };
        if let Err(err) = append_json_line(&self.log_path, &entry) {
            warn!(
                error = %err,
                path = %self.log_path.display(),
                action = action.as_str(),
                "failed to append fix log entry"
            );
        }
    }
}

/// Deterministic fix id derived from the gap id, so re-creation attempts for
/// the same gap collide visibly instead of minting new ids.
fn fix_id_for_gap(gap_id: &str) -> String {
    match gap_id.strip_prefix("GAP-") {
        Some(rest) => format!("FIX-{rest}"),
        None => format!("FIX-{gap_id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Effort, Severity};
    use tempfile::TempDir;

    fn gap(id: &str) -> StrategyGap {
        StrategyGap {
            id: id.to_string(),
            category: "foundation".to_string(),
            title: format!("Improve: {id}"),
            description: format!("{id} description"),
            severity: Severity::High,
            impact: "Materially weakens how the strategy performs in market.".to_string(),
            effort: Effort::Medium,
            priority: 8,
            related_checkpoints: vec!["foundation-purpose".to_string()],
            recommendations: vec![format!("resolve {id}")],
        }
    }

    fn tracker() -> (TempDir, FixTracker) {
        let dir = TempDir::new().expect("tempdir");
        let tracker = FixTracker::open(dir.path()).expect("open tracker");
        (dir, tracker)
    }

    #[test]
    fn loading_from_a_fresh_workspace_yields_an_empty_list() {
        let (_dir, tracker) = tracker();
        assert!(tracker.load_fixes().expect("load").is_empty());
        assert!(tracker.load_log().expect("log").is_empty());
    }

    #[test]
    fn save_then_load_round_trips_the_fix_list() {
        let (_dir, tracker) = tracker();
        let created = tracker
            .create_fixes_from_gaps(&[gap("GAP-foundation-purpose")])
            .expect("create");
        let loaded = tracker.load_fixes().expect("load");
        assert_eq!(created, loaded);
    }

    #[test]
    fn creation_is_idempotent_per_gap_id() {
        let (_dir, tracker) = tracker();
        let gaps = vec![gap("GAP-foundation-purpose"), gap("GAP-messaging-voice")];

        let first = tracker.create_fixes_from_gaps(&gaps).expect("first create");
        assert_eq!(first.len(), 2);

        let second = tracker.create_fixes_from_gaps(&gaps).expect("second create");
        assert!(second.is_empty());

        let all = tracker.load_fixes().expect("load");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "FIX-foundation-purpose");
        assert_eq!(all[0].status, FixStatus::Identified);
        assert_eq!(all[0].notes, vec!["resolve GAP-foundation-purpose".to_string()]);
        assert_eq!(all[0].created_at, all[0].updated_at);
    }

    #[test]
    fn duplicate_gap_ids_within_one_call_create_a_single_fix() {
        let (_dir, tracker) = tracker();
        let created = tracker
            .create_fixes_from_gaps(&[gap("GAP-foundation-purpose"), gap("GAP-foundation-purpose")])
            .expect("create");
        assert_eq!(created.len(), 1);
    }

    #[test]
    fn unknown_fix_ids_fail_explicitly() {
        let (_dir, tracker) = tracker();
        let err = tracker
            .update_fix_status("FIX-missing", FixStatus::Resolved, None)
            .expect_err("should fail");
        assert!(err.to_string().contains("not found"));

        let err = tracker
            .add_note("FIX-missing", "a note", None)
            .expect_err("should fail");
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn resolved_at_is_stamped_exactly_once() {
        let (_dir, tracker) = tracker();
        tracker
            .create_fixes_from_gaps(&[gap("GAP-foundation-purpose")])
            .expect("create");

        let resolved = tracker
            .update_fix_status("FIX-foundation-purpose", FixStatus::Resolved, None)
            .expect("resolve");
        let stamp = resolved.resolved_at.clone().expect("resolved_at set");

        // Permissive transitions: reopening is allowed, the stamp survives.
        let reopened = tracker
            .update_fix_status("FIX-foundation-purpose", FixStatus::Identified, None)
            .expect("reopen");
        assert_eq!(reopened.resolved_at.as_deref(), Some(stamp.as_str()));

        let verified = tracker
            .update_fix_status("FIX-foundation-purpose", FixStatus::Verified, None)
            .expect("verify");
        assert_eq!(verified.resolved_at.as_deref(), Some(stamp.as_str()));
    }

    #[test]
    fn audit_log_records_exactly_one_entry_per_mutating_action() {
        let (_dir, tracker) = tracker();
        tracker
            .create_fixes_from_gaps(&[gap("GAP-foundation-purpose"), gap("GAP-messaging-voice")])
            .expect("create");
        tracker
            .update_fix_status("FIX-foundation-purpose", FixStatus::InProgress, Some("starting"))
            .expect("update with note");
        tracker
            .update_fix_status("FIX-messaging-voice", FixStatus::WontFix, None)
            .expect("update without note");
        tracker
            .add_note("FIX-foundation-purpose", "more detail", Some("reviewer"))
            .expect("note");

        let log = tracker.load_log().expect("log");
        let count = |action: FixAction| log.iter().filter(|entry| entry.action == action).count();
        assert_eq!(count(FixAction::Created), 2);
        assert_eq!(count(FixAction::StatusChanged), 2);
        assert_eq!(count(FixAction::NoteAdded), 2);

        let status_change = log
            .iter()
            .find(|entry| entry.action == FixAction::StatusChanged)
            .expect("status change entry");
        assert!(status_change.description.contains("identified"));
        assert!(status_change.description.contains("in_progress"));

        let authored = log
            .iter()
            .find(|entry| entry.author.is_some())
            .expect("authored entry");
        assert_eq!(authored.author.as_deref(), Some("reviewer"));
    }

    #[test]
    fn query_helpers_filter_and_aggregate() {
        let (_dir, tracker) = tracker();
        tracker
            .create_fixes_from_gaps(&[gap("GAP-foundation-purpose"), gap("GAP-messaging-voice")])
            .expect("create");
        tracker
            .update_fix_status("FIX-messaging-voice", FixStatus::Resolved, None)
            .expect("resolve");

        let identified = tracker.fixes_with_status(FixStatus::Identified).expect("query");
        assert_eq!(identified.len(), 1);
        assert_eq!(identified[0].id, "FIX-foundation-purpose");

        let by_checkpoint = tracker
            .fixes_for_checkpoint("foundation-purpose")
            .expect("query");
        assert_eq!(by_checkpoint.len(), 2);

        let status_counts = tracker.counts_by_status().expect("counts");
        assert_eq!(status_counts.get("identified"), Some(&1));
        assert_eq!(status_counts.get("resolved"), Some(&1));

        let effort_counts = tracker.counts_by_effort().expect("counts");
        assert_eq!(effort_counts.get("medium"), Some(&2));
    }

    #[test]
    fn a_failed_log_write_does_not_roll_back_the_primary_write() {
        let dir = TempDir::new().expect("tempdir");
        let tracker = FixTracker::open(dir.path()).expect("open tracker");
        // Occupy the log path with a directory so appends fail.
        std::fs::create_dir(tracker.log_path()).expect("block log path");

        let created = tracker
            .create_fixes_from_gaps(&[gap("GAP-foundation-purpose")])
            .expect("creation must still succeed");
        assert_eq!(created.len(), 1);
        assert_eq!(tracker.load_fixes().expect("load").len(), 1);
    }
}
