use std::sync::LazyLock;

use regex::Regex;

use super::{CheckOutcome, excerpt, present};
use crate::context::ValidationContext;
use crate::model::BrandStrategy;

const PURPOSE_MIN_CHARS: usize = 30;
const MISSION_MIN_CHARS: usize = 30;
const VALUES_MIN: usize = 3;
const VALUES_MAX: usize = 7;

static ACTION_VERBS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(empower|enable|help|create|build|transform|inspire|connect|deliver|advance|drive|unlock|accelerate|simplify)\w*\b",
    )
    .expect("valid action verb regex")
});

static ASPIRATIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(future|world|become|leading|every|everyone|aspire|imagine|envision|redefine|pioneer)\w*\b",
    )
    .expect("valid aspirational language regex")
});

pub fn purpose_defined(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    match present(strategy.purpose.as_ref()) {
        None => CheckOutcome::fail(0, "no brand purpose is defined")
            .with_suggestion("Write a one-paragraph brand purpose stating why the brand exists beyond making money."),
        Some(purpose) if purpose.len() < PURPOSE_MIN_CHARS => {
            CheckOutcome::warning(50, format!("purpose is only {} characters", purpose.len()))
                .with_details(purpose.to_string())
                .with_suggestion("Expand the purpose into a full sentence that names who benefits and how.")
        }
        Some(purpose) => {
            CheckOutcome::pass(100, "purpose is defined and substantive").with_evidence(excerpt(purpose))
        }
    }
}

pub fn purpose_actionable(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    let Some(purpose) = present(strategy.purpose.as_ref()) else {
        return CheckOutcome::skipped("no purpose to assess");
    };

    match ACTION_VERBS.find(purpose) {
        Some(found) => CheckOutcome::pass(100, "purpose uses action language")
            .with_evidence(found.as_str().to_string()),
        None => CheckOutcome::warning(60, "purpose reads as static description")
            .with_suggestion("Lead the purpose with an action verb: what the brand does for whom."),
    }
}

pub fn mission_defined(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    match present(strategy.mission.as_ref()) {
        None => CheckOutcome::fail(0, "no mission statement is defined")
            .with_suggestion("Write a mission statement describing what the brand does today and for whom."),
        Some(mission) if mission.len() < MISSION_MIN_CHARS => {
            CheckOutcome::warning(50, format!("mission is only {} characters", mission.len()))
                .with_details(mission.to_string())
                .with_suggestion("Expand the mission to cover what the brand does, for whom, and to what end.")
        }
        Some(mission) => {
            CheckOutcome::pass(100, "mission is defined and substantive").with_evidence(excerpt(mission))
        }
    }
}

pub fn vision_aspirational(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    let Some(vision) = present(strategy.vision.as_ref()) else {
        return CheckOutcome::fail(0, "no vision statement is defined")
            .with_suggestion("Write a vision statement describing the future state the brand works toward.");
    };

    match ASPIRATIONAL.find(vision) {
        Some(found) => CheckOutcome::pass(100, "vision points at a future state")
            .with_evidence(found.as_str().to_string()),
        None => CheckOutcome::warning(70, "vision lacks aspirational language")
            .with_suggestion("Rewrite the vision to describe the changed future the brand is working toward."),
    }
}

pub fn values_count(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    let count = strategy.values.len();
    if count == 0 {
        return CheckOutcome::fail(0, "no core values are defined")
            .with_suggestion("Define 3 to 7 core values the brand actually operates by.");
    }
    if count < VALUES_MIN {
        return CheckOutcome::warning(60, format!("only {count} core values are defined"))
            .with_suggestion("Add core values until at least 3 are defined.");
    }
    if count > VALUES_MAX {
        return CheckOutcome::warning(70, format!("{count} core values dilute focus"))
            .with_suggestion("Consolidate the value list down to at most 7 entries.");
    }
    CheckOutcome::pass(100, format!("{count} core values are defined"))
}

pub fn values_distinct(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    if strategy.values.is_empty() {
        return CheckOutcome::skipped("no core values to assess");
    }

    let mut seen: Vec<String> = Vec::new();
    let mut duplicates: Vec<String> = Vec::new();
    let mut fragments = 0usize;
    for value in &strategy.values {
        let normalized = value.trim().to_lowercase();
        if normalized.len() < 3 {
            fragments += 1;
            continue;
        }
        if seen.contains(&normalized) {
            duplicates.push(value.trim().to_string());
        } else {
            seen.push(normalized);
        }
    }

    if !duplicates.is_empty() {
        return CheckOutcome::warning(50, "duplicate core values found")
            .with_details(duplicates.join(", "))
            .with_suggestion("Remove duplicate values or merge them into one clearly named value.");
    }
    if fragments > 0 {
        return CheckOutcome::warning(60, format!("{fragments} values are too short to mean anything"))
            .with_suggestion("Replace one-letter or empty value entries with named values.");
    }
    CheckOutcome::pass(100, "core values are distinct and substantive")
}
