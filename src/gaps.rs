use crate::checkpoints::{checkpoint_by_id, checkpoint_ids_in_category};
use crate::context::ValidationContext;
use crate::model::{BrandStrategy, CheckStatus, CheckpointResult, Effort, Severity, StrategyGap};

// Tunable detection thresholds, preserved as-is for report compatibility.
const CATEGORY_MEAN_FLOOR: f64 = 70.0;
const DIFFERENTIATORS_MIN: usize = 3;
const KEY_MESSAGES_MIN: usize = 3;

const PRIORITY_MAX: u32 = 10;

/// Derives prioritized gaps from checkpoint results plus cross-cutting
/// aggregate patterns, sorted descending by priority.
pub fn analyze_gaps(
    results: &[CheckpointResult],
    strategy: &BrandStrategy,
    context: Option<&ValidationContext>,
) -> Vec<StrategyGap> {
    let mut gaps: Vec<StrategyGap> = results
        .iter()
        .filter(|result| matches!(result.status, CheckStatus::Fail | CheckStatus::Warning))
        .filter_map(gap_from_result)
        .collect();

    gaps.extend(cross_cutting_gaps(results, strategy, context));

    // Priority descending; id ascending keeps equal-priority output stable.
    gaps.sort_by(|left, right| {
        right
            .priority
            .cmp(&left.priority)
            .then_with(|| left.id.cmp(&right.id))
    });
    gaps
}

pub fn severity_base(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => 10,
        Severity::High => 7,
        Severity::Medium => 4,
        Severity::Low => 2,
    }
}

/// Severity dominates; the score deficit nudges upward in 20-point steps.
/// Half-steps round down, so a bare 10-point deficit never bumps priority.
pub fn gap_priority(severity: Severity, score: u32) -> u32 {
    let deficit = (100_u32.saturating_sub(score) + 9) / 20;
    (severity_base(severity) + deficit).min(PRIORITY_MAX)
}

pub fn gap_effort(score: u32) -> Effort {
    if score == 0 {
        Effort::High
    } else if score < 50 {
        Effort::Medium
    } else {
        Effort::Low
    }
}

pub fn impact_text(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "Blocks credible use of the strategy until resolved.",
        Severity::High => "Materially weakens how the strategy performs in market.",
        Severity::Medium => "Leaves avoidable quality on the table.",
        Severity::Low => "Worth polishing once larger gaps are closed.",
    }
}

fn gap_from_result(result: &CheckpointResult) -> Option<StrategyGap> {
    let checkpoint = checkpoint_by_id(&result.checkpoint_id)?;
    Some(StrategyGap {
        id: format!("GAP-{}", checkpoint.id),
        category: checkpoint.category.to_string(),
        title: format!("Improve: {}", checkpoint.name),
        description: result.message.clone(),
        severity: checkpoint.severity,
        impact: impact_text(checkpoint.severity).to_string(),
        effort: gap_effort(result.score),
        priority: gap_priority(checkpoint.severity, result.score),
        related_checkpoints: vec![checkpoint.id.to_string()],
        recommendations: result.suggestions.clone(),
    })
}

fn cross_cutting_gaps(
    results: &[CheckpointResult],
    strategy: &BrandStrategy,
    context: Option<&ValidationContext>,
) -> Vec<StrategyGap> {
    let mut gaps = Vec::new();

    if let Some(mean) = category_mean(results, "foundation")
        && mean < CATEGORY_MEAN_FLOOR
    {
        gaps.push(StrategyGap {
            id: "GAP-foundation-incomplete".to_string(),
            category: "foundation".to_string(),
            title: "Brand foundation is incomplete".to_string(),
            description: format!(
                "Foundation checkpoints average {:.0}/100; the purpose, mission, vision, and values layer is not holding the rest up",
                mean
            ),
            severity: Severity::High,
            impact: impact_text(Severity::High).to_string(),
            effort: Effort::High,
            priority: gap_priority(Severity::High, mean.round() as u32),
            related_checkpoints: checkpoint_ids_in_category("foundation"),
            recommendations: vec![
                "Complete the foundation layer before refining downstream messaging.".to_string(),
            ],
        });
    }

    let has_positioning = strategy
        .positioning
        .as_deref()
        .is_some_and(|statement| !statement.trim().is_empty());
    let differentiator_count = strategy
        .differentiators
        .iter()
        .filter(|item| !item.trim().is_empty())
        .count();
    if !has_positioning || differentiator_count < DIFFERENTIATORS_MIN {
        gaps.push(StrategyGap {
            id: "GAP-differentiation-weak".to_string(),
            category: "positioning".to_string(),
            title: "Differentiation is not established".to_string(),
            description: format!(
                "A defensible position needs a positioning statement plus at least {DIFFERENTIATORS_MIN} differentiators; this strategy has {}{} differentiators",
                if has_positioning { "a statement and " } else { "no statement and " },
                differentiator_count
            ),
            severity: Severity::High,
            impact: impact_text(Severity::High).to_string(),
            effort: Effort::Medium,
            priority: 8,
            related_checkpoints: checkpoint_ids_in_category("positioning"),
            recommendations: vec![
                "Write the positioning statement and list at least 3 substantive differentiators.".to_string(),
            ],
        });
    }

    let has_voice = strategy.voice().is_some();
    let message_count = strategy
        .key_messages
        .iter()
        .filter(|message| !message.trim().is_empty())
        .count();
    if !has_voice || message_count < KEY_MESSAGES_MIN {
        gaps.push(StrategyGap {
            id: "GAP-messaging-incomplete".to_string(),
            category: "messaging".to_string(),
            title: "Messaging framework is incomplete".to_string(),
            description: format!(
                "A usable framework needs a defined voice plus at least {KEY_MESSAGES_MIN} key messages; this strategy has {} voice and {} messages",
                if has_voice { "a" } else { "no" },
                message_count
            ),
            severity: Severity::High,
            impact: impact_text(Severity::High).to_string(),
            effort: Effort::Medium,
            priority: 8,
            related_checkpoints: checkpoint_ids_in_category("messaging"),
            recommendations: vec![
                "Define the brand voice and write at least 3 key messages.".to_string(),
            ],
        });
    }

    if !context.is_some_and(ValidationContext::has_research) {
        gaps.push(StrategyGap {
            id: "GAP-market-intelligence-missing".to_string(),
            category: "evidence".to_string(),
            title: "No market intelligence backs the strategy".to_string(),
            description: "No evolution research or audit material was supplied, so every market claim is unverified".to_string(),
            severity: Severity::Medium,
            impact: impact_text(Severity::Medium).to_string(),
            effort: Effort::Medium,
            priority: 6,
            related_checkpoints: checkpoint_ids_in_category("evidence"),
            recommendations: vec![
                "Run brand evolution research or an audit and re-validate with that context attached.".to_string(),
            ],
        });
    }

    if let Some(mean) = category_mean(results, "implementation")
        && mean < CATEGORY_MEAN_FLOOR
    {
        gaps.push(StrategyGap {
            id: "GAP-implementation-unready".to_string(),
            category: "implementation".to_string(),
            title: "Strategy is not ready to implement".to_string(),
            description: format!(
                "Implementation checkpoints average {:.0}/100; teams cannot act on the strategy as written",
                mean
            ),
            severity: Severity::Medium,
            impact: impact_text(Severity::Medium).to_string(),
            effort: Effort::Medium,
            priority: gap_priority(Severity::Medium, mean.round() as u32),
            related_checkpoints: checkpoint_ids_in_category("implementation"),
            recommendations: vec![
                "Make voice guidance and key messages concrete enough to hand to a writer.".to_string(),
            ],
        });
    }

    gaps
}

/// Mean score of every checkpoint in a category, or `None` when none ran.
fn category_mean(results: &[CheckpointResult], category_id: &str) -> Option<f64> {
    let scores: Vec<u32> = results
        .iter()
        .filter(|result| {
            checkpoint_by_id(&result.checkpoint_id)
                .is_some_and(|checkpoint| checkpoint.category == category_id)
        })
        .map(|result| result.score)
        .collect();
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<u32>() as f64 / scores.len() as f64)
}
