use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal severity attached to each checkpoint. Drives status interpretation
/// and gap prioritization (critical > high > medium > low).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict of a single checkpoint run. `Skipped` means the checkpoint could
/// not be assessed because prerequisite input was missing, as opposed to
/// `Fail` which asserts an actual defect.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
    Skipped,
}

/// Relative effort required to close a gap or complete a fix.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Low,
    Medium,
    High,
}

impl Effort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Lifecycle status of a persisted fix record. Transitions are permissive:
/// manual corrections such as `verified -> identified` are allowed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixStatus {
    Identified,
    InProgress,
    Resolved,
    Verified,
    WontFix,
}

impl FixStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Identified => "identified",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Verified => "verified",
            Self::WontFix => "wont_fix",
        }
    }

    /// Statuses that stamp `resolved_at` the first time they are reached.
    pub fn is_resolution(self) -> bool {
        matches!(self, Self::Resolved | Self::Verified)
    }
}

impl fmt::Display for FixStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of audit-log entry written by the fix tracker.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixAction {
    Created,
    StatusChanged,
    NoteAdded,
}

impl FixAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::StatusChanged => "status_changed",
            Self::NoteAdded => "note_added",
        }
    }
}

/// Strategy document under validation. Every field is optional: absence is a
/// legitimate input that degrades individual checkpoint scores, never a
/// malformed document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandStrategy {
    pub purpose: Option<String>,
    pub mission: Option<String>,
    pub vision: Option<String>,
    pub values: Vec<String>,
    pub positioning: Option<String>,
    pub differentiators: Vec<String>,
    pub key_messages: Vec<String>,
    pub personality: Vec<String>,
    pub voice_and_tone: Option<VoiceAndTone>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoiceAndTone {
    pub voice: Option<String>,
    pub tone_attributes: Vec<String>,
}

impl BrandStrategy {
    pub fn voice(&self) -> Option<&str> {
        self.voice_and_tone
            .as_ref()
            .and_then(|vt| vt.voice.as_deref())
            .map(str::trim)
            .filter(|voice| !voice.is_empty())
    }

    pub fn tone_attributes(&self) -> &[String] {
        self.voice_and_tone
            .as_ref()
            .map(|vt| vt.tone_attributes.as_slice())
            .unwrap_or(&[])
    }
}

/// Per-run verdict for one checkpoint. Recomputed fresh every run, never
/// persisted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointResult {
    pub checkpoint_id: String,
    pub status: CheckStatus,
    pub score: u32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub evidence: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub suggestions: Vec<String>,
}

/// Prioritized, per-run strategy deficiency derived from checkpoint results
/// or a cross-cutting aggregate pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyGap {
    pub id: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub impact: String,
    pub effort: Effort,
    pub priority: u32,
    pub related_checkpoints: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Persisted remediation record. Lives until deleted, mutated only through
/// the fix tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityFix {
    pub id: String,
    pub gap_id: String,
    pub title: String,
    pub description: String,
    pub status: FixStatus,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub resolved_at: Option<String>,
    pub effort: Effort,
    pub checkpoints: Vec<String>,
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub assignee: Option<String>,
}

/// Append-only audit record, one per mutating fix-tracker action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixLogEntry {
    pub timestamp: String,
    pub fix_id: String,
    pub action: FixAction,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub author: Option<String>,
}

/// Rounded arithmetic mean of one category's checkpoint scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: String,
    pub score: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total_checkpoints: usize,
    pub passed: usize,
    pub warnings: usize,
    pub failed: usize,
    pub skipped: usize,
    pub critical_issues: usize,
    pub high_priority_issues: usize,
    pub category_scores: Vec<CategoryScore>,
}

/// Tiered remediation guidance assembled by the engine. Each bucket is
/// de-duplicated and capped (5/10/10).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
}

/// Full engine output for one validation run, suitable for direct
/// persistence and for an external report renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub brand_name: String,
    pub validated_at: String,
    pub overall_score: u32,
    pub checkpoint_results: Vec<CheckpointResult>,
    pub gaps: Vec<StrategyGap>,
    pub fixes: Vec<QualityFix>,
    pub summary: ValidationSummary,
    pub recommendations: Recommendations,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_deserializes_from_camel_case_with_missing_fields() {
        let raw = r#"
        {
          "purpose": "Empower small teams to ship faster",
          "keyMessages": ["Ship in days, not months"],
          "voiceAndTone": { "voice": "Confident and plain-spoken" }
        }
        "#;

        let strategy: BrandStrategy =
            serde_json::from_str(raw).expect("partial strategy should deserialize");
        assert_eq!(
            strategy.purpose.as_deref(),
            Some("Empower small teams to ship faster")
        );
        assert!(strategy.mission.is_none());
        assert!(strategy.values.is_empty());
        assert_eq!(strategy.key_messages.len(), 1);
        assert_eq!(strategy.voice(), Some("Confident and plain-spoken"));
        assert!(strategy.tone_attributes().is_empty());
    }

    #[test]
    fn fix_status_round_trips_through_snake_case() {
        let json = serde_json::to_string(&FixStatus::WontFix).expect("serialize status");
        assert_eq!(json, "\"wont_fix\"");
        let back: FixStatus = serde_json::from_str(&json).expect("deserialize status");
        assert_eq!(back, FixStatus::WontFix);
    }

    #[test]
    fn resolution_statuses_are_resolved_and_verified_only() {
        assert!(FixStatus::Resolved.is_resolution());
        assert!(FixStatus::Verified.is_resolution());
        assert!(!FixStatus::Identified.is_resolution());
        assert!(!FixStatus::InProgress.is_resolution());
        assert!(!FixStatus::WontFix.is_resolution());
    }
}
