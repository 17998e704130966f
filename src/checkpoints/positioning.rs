use std::sync::LazyLock;

use regex::Regex;

use super::{CheckOutcome, excerpt, present};
use crate::context::ValidationContext;
use crate::model::BrandStrategy;

const STATEMENT_FULL_CHARS: usize = 100;
const STATEMENT_SHORT_CHARS: usize = 40;
const DIFFERENTIATORS_MIN: usize = 3;
const DIFFERENTIATOR_MIN_CHARS: usize = 20;

static AUDIENCE_SIGNIFIERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(audiences?|customers?|clients?|teams?|founders?|developers?|makers?|marketers?|leaders?|professionals?|organi[sz]ations?|who)\b|\bfor\s+\w+",
    )
    .expect("valid audience signifier regex")
});

static DIFFERENTIATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(only|unlike|unique(ly)?|first|distinct|different|alternative)\b|\bno other\b|\bbetter than\b|\binstead of\b",
    )
    .expect("valid differentiation language regex")
});

static CONCRETE_CLAIM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\d+\s*%?|\bonly\b|\bpatent\w*\b|\bproprietary\b|\bcertified\b|\baward\w*\b|\bbenchmark\w*\b|\bguarantee\w*\b|\bunlike\b|\bfirst\b)",
    )
    .expect("valid concrete-claim regex")
});

pub fn statement_defined(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    match present(strategy.positioning.as_ref()) {
        None => CheckOutcome::fail(0, "no positioning statement is defined").with_suggestion(
            "Write a positioning statement naming the audience, the category, and why the brand wins.",
        ),
        Some(statement) if statement.len() < STATEMENT_SHORT_CHARS => {
            CheckOutcome::warning(30, format!("positioning is only {} characters", statement.len()))
                .with_details(statement.to_string())
                .with_suggestion("Expand the positioning into a full statement, not a slogan.")
        }
        Some(statement) if statement.len() < STATEMENT_FULL_CHARS => {
            CheckOutcome::warning(60, format!("positioning is thin at {} characters", statement.len()))
                .with_suggestion("Add the audience and the reason to believe to the positioning statement.")
        }
        Some(statement) => CheckOutcome::pass(100, "positioning statement is defined and substantive")
            .with_evidence(excerpt(statement)),
    }
}

pub fn audience_named(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    let Some(statement) = present(strategy.positioning.as_ref()) else {
        return CheckOutcome::skipped("no positioning statement to assess");
    };

    match AUDIENCE_SIGNIFIERS.find(statement) {
        Some(found) => CheckOutcome::pass(100, "positioning names an audience")
            .with_evidence(found.as_str().to_string()),
        None => CheckOutcome::warning(50, "positioning does not say who the brand serves")
            .with_suggestion("Name the audience explicitly in the positioning statement."),
    }
}

pub fn differentiation_language(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    let Some(statement) = present(strategy.positioning.as_ref()) else {
        return CheckOutcome::skipped("no positioning statement to assess");
    };

    match DIFFERENTIATION.find(statement) {
        Some(found) => CheckOutcome::pass(100, "positioning claims a distinct place")
            .with_evidence(found.as_str().to_string()),
        None => CheckOutcome::warning(50, "positioning does not differentiate from alternatives")
            .with_suggestion("State what makes the brand different from the obvious alternatives."),
    }
}

pub fn differentiator_count(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    let differentiators: Vec<&str> = strategy
        .differentiators
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .collect();

    if differentiators.is_empty() {
        return CheckOutcome::fail(0, "no differentiators are listed")
            .with_suggestion("List at least 3 differentiators explaining why the brand wins.");
    }
    if differentiators.len() < DIFFERENTIATORS_MIN {
        return CheckOutcome::warning(
            40,
            format!("only {} differentiators are listed", differentiators.len()),
        )
        .with_suggestion("Add differentiators until at least 3 substantive ones are listed.");
    }

    let short: Vec<&str> = differentiators
        .iter()
        .copied()
        .filter(|item| item.len() <= DIFFERENTIATOR_MIN_CHARS)
        .collect();
    if !short.is_empty() {
        return CheckOutcome::warning(60, format!("{} differentiators are one-liners", short.len()))
            .with_details(short.join("; "))
            .with_suggestion("Expand each differentiator into a sentence explaining the advantage.");
    }

    CheckOutcome::pass(
        100,
        format!("{} substantive differentiators are listed", differentiators.len()),
    )
}

pub fn differentiator_specificity(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    let differentiators: Vec<&str> = strategy
        .differentiators
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .collect();
    if differentiators.is_empty() {
        return CheckOutcome::skipped("no differentiators to assess");
    }

    let specific = differentiators
        .iter()
        .filter(|item| CONCRETE_CLAIM.is_match(item))
        .count();

    if specific == differentiators.len() {
        return CheckOutcome::pass(100, "every differentiator carries a concrete claim");
    }
    let vague = differentiators.len() - specific;
    if specific * 2 >= differentiators.len() {
        CheckOutcome::warning(70, format!("{vague} differentiators lack concrete proof"))
            .with_suggestion("Back each differentiator with a number, a proof point, or a named capability.")
    } else {
        CheckOutcome::warning(40, "most differentiators are generic claims")
            .with_details(format!("{specific} of {} carry concrete proof", differentiators.len()))
            .with_suggestion("Rewrite differentiators around checkable facts instead of adjectives.")
    }
}
