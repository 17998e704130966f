use super::{CheckOutcome, significant_terms};
use crate::context::ValidationContext;
use crate::model::BrandStrategy;

const DEPLOYABLE_MIN_CHARS: usize = 20;
const DEPLOYABLE_MAX_CHARS: usize = 220;
const AUDIT_ECHO_HEALTHY: usize = 3;

pub fn voice_guidance_usable(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    let has_voice = strategy.voice().is_some();
    let tone_count = strategy
        .tone_attributes()
        .iter()
        .filter(|attribute| !attribute.trim().is_empty())
        .count();

    match (has_voice, tone_count >= 2) {
        (true, true) => CheckOutcome::pass(100, "voice and tone give writers enough direction"),
        (true, false) => CheckOutcome::warning(50, "voice is defined but tone range is missing")
            .with_suggestion("Add at least 2 tone attributes so the voice can flex per situation."),
        (false, true) => CheckOutcome::warning(50, "tone attributes exist without a voice to anchor them")
            .with_suggestion("Describe the brand voice the tone attributes are variations of."),
        (false, false) => CheckOutcome::fail(0, "no usable voice guidance exists")
            .with_suggestion("Define a brand voice plus 2 to 6 tone attributes before any copy is written."),
    }
}

pub fn message_deployability(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    let messages: Vec<&str> = strategy
        .key_messages
        .iter()
        .map(|message| message.trim())
        .filter(|message| !message.is_empty())
        .collect();
    if messages.is_empty() {
        return CheckOutcome::skipped("no key messages to assess");
    }

    let deployable = messages
        .iter()
        .filter(|message| (DEPLOYABLE_MIN_CHARS..=DEPLOYABLE_MAX_CHARS).contains(&message.len()))
        .count();

    if deployable == messages.len() {
        return CheckOutcome::pass(100, "every key message fits real placements as written");
    }
    if deployable * 2 >= messages.len() {
        CheckOutcome::warning(
            60,
            format!("{} key messages need rewriting before use", messages.len() - deployable),
        )
        .with_suggestion("Trim or expand key messages so each fits a headline or intro slot as written.")
    } else {
        CheckOutcome::warning(30, "most key messages cannot be deployed as written")
            .with_details(format!("{deployable} of {} are deployable", messages.len()))
            .with_suggestion("Trim or expand key messages so each fits a headline or intro slot as written.")
    }
}

pub fn audit_follow_through(strategy: &BrandStrategy, context: Option<&ValidationContext>) -> CheckOutcome {
    let Some(dump) = context.and_then(|ctx| ctx.audit_dump()) else {
        return CheckOutcome::skipped("no audit results to follow up on");
    };

    let corpus = strategy_corpus(strategy);
    if corpus.is_empty() {
        return CheckOutcome::skipped("strategy has no prose fields to compare against the audit");
    }

    let terms = significant_terms(&corpus);
    let echoed = dump.matching_terms(terms.iter().map(String::as_str));

    if echoed.len() >= AUDIT_ECHO_HEALTHY {
        return CheckOutcome::pass(100, "strategy vocabulary tracks the audit findings")
            .with_evidence(echoed[..AUDIT_ECHO_HEALTHY].join(", "));
    }
    if echoed.is_empty() {
        CheckOutcome::warning(30, "strategy shows no trace of the audit findings")
            .with_suggestion("Work the audit's named findings into the strategy or record why they were rejected.")
    } else {
        CheckOutcome::warning(60, "strategy only partially reflects the audit findings")
            .with_details(format!("echoed terms: {}", echoed.join(", ")))
            .with_suggestion("Work the audit's named findings into the strategy or record why they were rejected.")
    }
}

fn strategy_corpus(strategy: &BrandStrategy) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for field in [
        strategy.purpose.as_deref(),
        strategy.mission.as_deref(),
        strategy.vision.as_deref(),
        strategy.positioning.as_deref(),
    ]
    .into_iter()
    .flatten()
    {
        parts.push(field);
    }
    for message in &strategy.key_messages {
        parts.push(message.as_str());
    }
    parts.join(" ").trim().to_string()
}
