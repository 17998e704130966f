use super::{CheckOutcome, present, significant_terms};
use crate::context::ValidationContext;
use crate::model::BrandStrategy;

const SOURCES_HEALTHY: usize = 3;
const CREDIBLE_TIER_MAX: u32 = 2;

pub fn research_context_present(_strategy: &BrandStrategy, context: Option<&ValidationContext>) -> CheckOutcome {
    let Some(context) = context else {
        return CheckOutcome::warning(30, "no validation context was supplied")
            .with_suggestion("Attach evolution research or audit results so claims can be cross-checked.");
    };
    if !context.has_research() {
        return CheckOutcome::warning(30, "context carries no research or audit material")
            .with_suggestion("Attach evolution research or audit results so claims can be cross-checked.");
    }

    let mut parts = Vec::new();
    if context.evolution_outputs.is_some() {
        parts.push("evolution outputs");
    }
    if context.audit_results.is_some() {
        parts.push("audit results");
    }
    CheckOutcome::pass(100, "upstream research material is present").with_details(parts.join(", "))
}

pub fn audience_grounding(strategy: &BrandStrategy, context: Option<&ValidationContext>) -> CheckOutcome {
    let Some(statement) = present(strategy.positioning.as_ref()) else {
        return CheckOutcome::skipped("no positioning statement to ground");
    };
    let Some(dump) = context.and_then(|ctx| ctx.research_dump()) else {
        return CheckOutcome::skipped("no research material to probe");
    };

    let terms = significant_terms(statement);
    let matched = dump.matching_terms(terms.iter().map(String::as_str));

    match matched.len() {
        0 => CheckOutcome::warning(40, "positioning vocabulary never appears in the research")
            .with_suggestion("Reconcile the positioning with what the research actually says about the audience."),
        1 => CheckOutcome::warning(60, "positioning barely overlaps the research material")
            .with_details(format!("matched term: {}", matched[0]))
            .with_suggestion("Ground more of the positioning claims in the research findings."),
        _ => CheckOutcome::pass(100, "positioning vocabulary appears in the research")
            .with_evidence(matched.join(", ")),
    }
}

pub fn differentiator_grounding(strategy: &BrandStrategy, context: Option<&ValidationContext>) -> CheckOutcome {
    let differentiators: Vec<&str> = strategy
        .differentiators
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .collect();
    if differentiators.is_empty() {
        return CheckOutcome::skipped("no differentiators to ground");
    }
    let Some(dump) = context.and_then(|ctx| ctx.research_dump()) else {
        return CheckOutcome::skipped("no research material to probe");
    };

    let grounded = differentiators
        .iter()
        .filter(|item| {
            significant_terms(item)
                .iter()
                .any(|term| dump.contains_term(term))
        })
        .count();

    if grounded == differentiators.len() {
        return CheckOutcome::pass(100, "every differentiator traces back to the research");
    }
    if grounded * 2 >= differentiators.len() {
        CheckOutcome::warning(
            70,
            format!("{} differentiators have no trace in the research", differentiators.len() - grounded),
        )
        .with_suggestion("Verify ungrounded differentiators against the research before publishing them.")
    } else {
        CheckOutcome::warning(40, "most differentiators have no trace in the research")
            .with_details(format!("{grounded} of {} are grounded", differentiators.len()))
            .with_suggestion("Verify ungrounded differentiators against the research before publishing them.")
    }
}

pub fn sources_cited(_strategy: &BrandStrategy, context: Option<&ValidationContext>) -> CheckOutcome {
    let count = context.map(|ctx| ctx.sources.len()).unwrap_or(0);
    if count == 0 {
        return CheckOutcome::warning(40, "no supporting sources are cited")
            .with_suggestion("Attach the sources the strategy's market claims rest on.");
    }
    if count < SOURCES_HEALTHY {
        return CheckOutcome::warning(60, format!("only {count} sources are cited"))
            .with_suggestion("Cite at least 3 independent sources for the market claims.");
    }
    CheckOutcome::pass(100, format!("{count} supporting sources are cited"))
}

pub fn source_credibility(_strategy: &BrandStrategy, context: Option<&ValidationContext>) -> CheckOutcome {
    let sources = match context {
        Some(ctx) if !ctx.sources.is_empty() => &ctx.sources,
        _ => return CheckOutcome::skipped("no sources to assess"),
    };

    let credible: Vec<&str> = sources
        .iter()
        .filter(|source| source.tier <= CREDIBLE_TIER_MAX)
        .map(|source| source.url.as_str())
        .collect();

    if credible.is_empty() {
        return CheckOutcome::warning(50, "no cited source is tier 1 or tier 2")
            .with_suggestion("Add at least one high-credibility source backing the core claims.");
    }
    CheckOutcome::pass(100, format!("{} high-credibility sources cited", credible.len()))
        .with_evidence(credible.join(", "))
}
