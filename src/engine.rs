use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use anyhow::{Result, bail};

use crate::checkpoints::{
    CATALOGUE, CATEGORIES, CheckpointCategory, QualityCheckpoint, checkpoint_by_id,
};
use crate::context::ValidationContext;
use crate::gaps::analyze_gaps;
use crate::model::{
    BrandStrategy, CategoryScore, CheckStatus, CheckpointResult, QualityFix, Recommendations,
    Severity, StrategyGap, ValidationReport, ValidationSummary,
};
use crate::util::now_utc_string;

const IMMEDIATE_CAP: usize = 5;
const SHORT_TERM_CAP: usize = 10;
const LONG_TERM_CAP: usize = 10;
const SHORT_TERM_PRIORITY_MIN: u32 = 8;
const LONG_TERM_PRIORITY_MIN: u32 = 5;

/// Orchestrates one validation run: executes the checkpoint battery,
/// aggregates the weighted score, delegates gap analysis, and assembles the
/// report. Does no I/O; tracked fixes are merged read-only by the caller.
pub struct ValidationEngine {
    _private: (),
}

impl ValidationEngine {
    /// Startup self-check: category weights must form a convex combination.
    pub fn new() -> Result<Self> {
        let total: f64 = CATEGORIES.iter().map(|category| category.weight).sum();
        if (total - 1.0).abs() > 1e-9 {
            bail!("checkpoint category weights sum to {total}, expected 1.0");
        }
        Ok(Self { _private: () })
    }

    pub fn validate(
        &self,
        strategy: &BrandStrategy,
        brand_name: &str,
        context: Option<&ValidationContext>,
    ) -> ValidationReport {
        self.validate_with_fixes(strategy, brand_name, context, Vec::new())
    }

    /// Full run with previously tracked fixes merged into the report.
    pub fn validate_with_fixes(
        &self,
        strategy: &BrandStrategy,
        brand_name: &str,
        context: Option<&ValidationContext>,
        fixes: Vec<QualityFix>,
    ) -> ValidationReport {
        let results = run_checkpoints(CATALOGUE, strategy, context);
        let means = category_means(&results);
        let overall_score = weighted_overall(&means);
        let gaps = analyze_gaps(&results, strategy, context);
        let summary = build_summary(&results, &means);
        let recommendations = build_recommendations(&results, &gaps);

        ValidationReport {
            brand_name: brand_name.to_string(),
            validated_at: now_utc_string(),
            overall_score,
            checkpoint_results: results,
            gaps,
            fixes,
            summary,
            recommendations,
        }
    }
}

/// Runs every checkpoint in catalogue order. A panicking validator is
/// isolated and converted to a synthetic fail so one broken checkpoint never
/// aborts the run.
fn run_checkpoints(
    catalogue: &[QualityCheckpoint],
    strategy: &BrandStrategy,
    context: Option<&ValidationContext>,
) -> Vec<CheckpointResult> {
    catalogue
        .iter()
        .map(|checkpoint| {
            match panic::catch_unwind(AssertUnwindSafe(|| (checkpoint.validator)(strategy, context))) {
                Ok(outcome) => outcome.into_result(checkpoint.id),
                Err(payload) => CheckpointResult {
                    checkpoint_id: checkpoint.id.to_string(),
                    status: CheckStatus::Fail,
                    score: 0,
                    message: format!("checkpoint execution error: {}", panic_message(payload)),
                    details: None,
                    evidence: Vec::new(),
                    suggestions: Vec::new(),
                },
            }
        })
        .collect()
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "validator panicked".to_string()
    }
}

/// Arithmetic mean per category, paired with the category definition. Every
/// category keeps its own mean so a category with fewer checkpoints is not
/// penalized relative to one with more.
fn category_means(results: &[CheckpointResult]) -> Vec<(&'static CheckpointCategory, f64)> {
    CATEGORIES
        .iter()
        .map(|category| {
            let scores: Vec<u32> = results
                .iter()
                .filter(|result| {
                    checkpoint_by_id(&result.checkpoint_id)
                        .is_some_and(|checkpoint| checkpoint.category == category.id)
                })
                .map(|result| result.score)
                .collect();
            let mean = if scores.is_empty() {
                0.0
            } else {
                scores.iter().sum::<u32>() as f64 / scores.len() as f64
            };
            (category, mean)
        })
        .collect()
}

/// Convex combination of category means under the category weights.
fn weighted_overall(means: &[(&CheckpointCategory, f64)]) -> u32 {
    let total: f64 = means
        .iter()
        .map(|(category, mean)| category.weight * mean)
        .sum();
    total.round() as u32
}

fn build_summary(
    results: &[CheckpointResult],
    means: &[(&CheckpointCategory, f64)],
) -> ValidationSummary {
    let mut summary = ValidationSummary {
        total_checkpoints: results.len(),
        ..ValidationSummary::default()
    };

    for result in results {
        match result.status {
            CheckStatus::Pass => summary.passed += 1,
            CheckStatus::Warning => summary.warnings += 1,
            CheckStatus::Fail => summary.failed += 1,
            CheckStatus::Skipped => summary.skipped += 1,
        }

        let Some(checkpoint) = checkpoint_by_id(&result.checkpoint_id) else {
            continue;
        };
        if checkpoint.severity == Severity::Critical && result.status == CheckStatus::Fail {
            summary.critical_issues += 1;
        }
        if checkpoint.severity == Severity::High
            && matches!(result.status, CheckStatus::Fail | CheckStatus::Warning)
        {
            summary.high_priority_issues += 1;
        }
    }

    summary.category_scores = means
        .iter()
        .map(|(category, mean)| CategoryScore {
            category: category.id.to_string(),
            score: mean.round() as u32,
        })
        .collect();

    summary
}

/// Buckets remediation text into tiers: immediate from critical fails,
/// short-term from high-severity issues and top-priority gaps, long-term
/// from mid-priority gaps. Each bucket de-duplicated and capped.
fn build_recommendations(results: &[CheckpointResult], gaps: &[StrategyGap]) -> Recommendations {
    let mut recommendations = Recommendations::default();

    for result in results {
        let Some(checkpoint) = checkpoint_by_id(&result.checkpoint_id) else {
            continue;
        };
        if checkpoint.severity == Severity::Critical && result.status == CheckStatus::Fail {
            for suggestion in &result.suggestions {
                push_unique(&mut recommendations.immediate, suggestion, IMMEDIATE_CAP);
            }
        }
        if checkpoint.severity == Severity::High
            && matches!(result.status, CheckStatus::Fail | CheckStatus::Warning)
        {
            for suggestion in &result.suggestions {
                push_unique(&mut recommendations.short_term, suggestion, SHORT_TERM_CAP);
            }
        }
    }

    for gap in gaps {
        if gap.priority >= SHORT_TERM_PRIORITY_MIN {
            for recommendation in &gap.recommendations {
                push_unique(&mut recommendations.short_term, recommendation, SHORT_TERM_CAP);
            }
        } else if gap.priority >= LONG_TERM_PRIORITY_MIN {
            for recommendation in &gap.recommendations {
                push_unique(&mut recommendations.long_term, recommendation, LONG_TERM_CAP);
            }
        }
    }

    recommendations
}

fn push_unique(bucket: &mut Vec<String>, value: &str, cap: usize) {
    if bucket.len() >= cap || bucket.iter().any(|existing| existing == value) {
        return;
    }
    bucket.push(value.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkpoints::CheckOutcome;

    fn engine() -> ValidationEngine {
        ValidationEngine::new().expect("weights should sum to 1.0")
    }

    #[test]
    fn engine_constructor_passes_the_weight_self_check() {
        assert!(ValidationEngine::new().is_ok());
    }

    #[test]
    fn weighted_overall_is_a_convex_combination_of_category_means() {
        let categories = [
            CheckpointCategory { id: "a", name: "A", description: "", weight: 0.25 },
            CheckpointCategory { id: "b", name: "B", description: "", weight: 0.25 },
            CheckpointCategory { id: "c", name: "C", description: "", weight: 0.15 },
            CheckpointCategory { id: "d", name: "D", description: "", weight: 0.20 },
            CheckpointCategory { id: "e", name: "E", description: "", weight: 0.10 },
            CheckpointCategory { id: "f", name: "F", description: "", weight: 0.05 },
        ];
        let scores = [100.0, 100.0, 0.0, 100.0, 100.0, 100.0];
        let means: Vec<(&CheckpointCategory, f64)> =
            categories.iter().zip(scores).collect();
        assert_eq!(weighted_overall(&means), 85);
    }

    fn panicking_validator(
        _strategy: &BrandStrategy,
        _context: Option<&ValidationContext>,
    ) -> CheckOutcome {
        panic!("synthetic validator defect");
    }

    fn passing_validator(
        _strategy: &BrandStrategy,
        _context: Option<&ValidationContext>,
    ) -> CheckOutcome {
        CheckOutcome::pass(100, "fine")
    }

    #[test]
    fn a_panicking_validator_is_isolated_as_a_labeled_fail() {
        let catalogue = [
            QualityCheckpoint {
                id: "test-broken",
                category: "foundation",
                name: "Broken",
                description: "always panics",
                severity: Severity::Medium,
                validator: panicking_validator,
            },
            QualityCheckpoint {
                id: "test-fine",
                category: "foundation",
                name: "Fine",
                description: "always passes",
                severity: Severity::Medium,
                validator: passing_validator,
            },
        ];

        let results = run_checkpoints(&catalogue, &BrandStrategy::default(), None);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, CheckStatus::Fail);
        assert_eq!(results[0].score, 0);
        assert!(
            results[0]
                .message
                .starts_with("checkpoint execution error:"),
            "message was: {}",
            results[0].message
        );
        assert!(results[0].message.contains("synthetic validator defect"));
        assert_eq!(results[1].status, CheckStatus::Pass);
    }

    #[test]
    fn validation_is_deterministic_apart_from_the_timestamp() {
        let strategy = BrandStrategy {
            purpose: Some("Empower independent makers to build durable businesses".to_string()),
            values: vec!["Craft".into(), "Candor".into(), "Grit".into()],
            ..BrandStrategy::default()
        };
        let engine = engine();
        let first = engine.validate(&strategy, "Acme", None);
        let second = engine.validate(&strategy, "Acme", None);
        assert_eq!(first.checkpoint_results, second.checkpoint_results);
        assert_eq!(first.gaps, second.gaps);
        assert_eq!(first.overall_score, second.overall_score);
        assert_eq!(first.summary, second.summary);
    }

    #[test]
    fn engine_never_errors_on_an_empty_strategy() {
        let report = engine().validate(&BrandStrategy::default(), "Empty Brand", None);
        assert_eq!(report.summary.total_checkpoints, CATALOGUE.len());
        assert!(report.overall_score <= 100);
        assert!(!report.gaps.is_empty());
        assert!(report.fixes.is_empty());
    }

    #[test]
    fn recommendation_buckets_deduplicate_and_cap() {
        let mut bucket = Vec::new();
        push_unique(&mut bucket, "do the thing", 2);
        push_unique(&mut bucket, "do the thing", 2);
        push_unique(&mut bucket, "do another thing", 2);
        push_unique(&mut bucket, "one too many", 2);
        assert_eq!(bucket, vec!["do the thing".to_string(), "do another thing".to_string()]);
    }

    #[test]
    fn end_to_end_scenario_matches_the_expected_checkpoint_verdicts() {
        let positioning = "For independent makers who outgrow spreadsheets, Acme is the only \
                           workshop platform that turns one-off commissions into repeatable, \
                           predictable income."
            .to_string();
        assert!(positioning.len() >= 100);

        let strategy = BrandStrategy {
            purpose: None,
            positioning: Some(positioning),
            differentiators: vec![
                "Only platform with native kiln-schedule integration".to_string(),
                "Flat 2% fee instead of marketplace-style 30% cuts".to_string(),
                "First to offer an offline studio mode with guaranteed sync".to_string(),
                "Commission pipeline with a 30-day payout guarantee".to_string(),
            ],
            key_messages: Vec::new(),
            ..BrandStrategy::default()
        };

        let report = engine().validate(&strategy, "Acme", None);
        let by_id = |id: &str| {
            report
                .checkpoint_results
                .iter()
                .find(|result| result.checkpoint_id == id)
                .unwrap_or_else(|| panic!("missing result for {id}"))
        };

        let purpose = by_id("foundation-purpose");
        assert_eq!(purpose.status, CheckStatus::Fail);
        assert_eq!(purpose.score, 0);

        let statement = by_id("positioning-statement");
        assert_eq!(statement.status, CheckStatus::Pass);
        assert_eq!(statement.score, 100);

        let differentiators = by_id("positioning-differentiator-count");
        assert_eq!(differentiators.status, CheckStatus::Pass);
        assert_eq!(differentiators.score, 100);

        let messages = by_id("messaging-key-messages");
        assert_eq!(messages.status, CheckStatus::Fail);
        assert_eq!(messages.score, 0);

        let foundation = report
            .summary
            .category_scores
            .iter()
            .find(|entry| entry.category == "foundation")
            .expect("foundation category score");
        assert_eq!(foundation.score, 0);

        let positioning_score = report
            .summary
            .category_scores
            .iter()
            .find(|entry| entry.category == "positioning")
            .expect("positioning category score");
        assert_eq!(positioning_score.score, 100);

        // The missing foundation drags the weighted overall well below the
        // positioning category's perfect score.
        assert!(report.overall_score < 50, "overall was {}", report.overall_score);
        assert!(report.overall_score >= 25, "overall was {}", report.overall_score);

        let top_priority = report.gaps[0].priority;
        assert_eq!(top_priority, 10);
        let purpose_gap = report
            .gaps
            .iter()
            .find(|gap| gap.id == "GAP-foundation-purpose")
            .expect("purpose gap");
        assert_eq!(purpose_gap.priority, top_priority);

        assert!(report.summary.critical_issues >= 2);
        assert!(!report.recommendations.immediate.is_empty());
        assert!(report.recommendations.immediate.len() <= 5);
    }
}
