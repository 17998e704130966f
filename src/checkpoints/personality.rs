use super::{CheckOutcome, present, shared_terms};
use crate::context::ValidationContext;
use crate::model::BrandStrategy;

const TRAITS_MIN: usize = 3;
const TRAITS_MAX: usize = 6;

// Traits so common they describe every brand and therefore none.
const GENERIC_TRAITS: &[&str] = &[
    "innovative",
    "professional",
    "quality",
    "reliable",
    "trusted",
    "trustworthy",
    "passionate",
    "dynamic",
    "excellent",
    "dedicated",
    "customer-focused",
    "authentic",
];

pub fn traits_count(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    let count = strategy
        .personality
        .iter()
        .filter(|trait_name| !trait_name.trim().is_empty())
        .count();
    if count == 0 {
        return CheckOutcome::fail(0, "no personality traits are defined")
            .with_suggestion("Define 3 to 6 personality traits that shape how the brand behaves.");
    }
    if count < TRAITS_MIN {
        return CheckOutcome::warning(50, format!("only {count} personality traits are defined"))
            .with_suggestion("Add personality traits until at least 3 are defined.");
    }
    if count > TRAITS_MAX {
        return CheckOutcome::warning(70, format!("{count} personality traits are too many to act on"))
            .with_suggestion("Trim the personality list down to at most 6 traits.");
    }
    CheckOutcome::pass(100, format!("{count} personality traits are defined"))
}

pub fn traits_distinctive(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    let traits: Vec<&str> = strategy
        .personality
        .iter()
        .map(|trait_name| trait_name.trim())
        .filter(|trait_name| !trait_name.is_empty())
        .collect();
    if traits.is_empty() {
        return CheckOutcome::skipped("no personality traits to assess");
    }

    let generic: Vec<&str> = traits
        .iter()
        .copied()
        .filter(|trait_name| GENERIC_TRAITS.contains(&trait_name.to_lowercase().as_str()))
        .collect();

    if generic.is_empty() {
        return CheckOutcome::pass(100, "personality traits are distinctive");
    }
    if generic.len() * 2 <= traits.len() {
        CheckOutcome::warning(60, format!("{} traits are generic filler", generic.len()))
            .with_details(generic.join(", "))
            .with_suggestion("Replace generic traits with ones a competitor could not also claim.")
    } else {
        CheckOutcome::warning(30, "most personality traits are generic filler")
            .with_details(generic.join(", "))
            .with_suggestion("Replace generic traits with ones a competitor could not also claim.")
    }
}

pub fn purpose_mission_alignment(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    let (Some(purpose), Some(mission)) = (
        present(strategy.purpose.as_ref()),
        present(strategy.mission.as_ref()),
    ) else {
        return CheckOutcome::skipped("purpose and mission are not both defined");
    };

    let shared = shared_terms(purpose, mission);
    if shared.is_empty() {
        return CheckOutcome::warning(60, "purpose and mission share no thematic vocabulary")
            .with_suggestion("Align purpose and mission around the same core themes and audience.");
    }
    CheckOutcome::pass(100, "purpose and mission share thematic vocabulary")
        .with_evidence(shared.join(", "))
}

pub fn positioning_message_alignment(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    let Some(statement) = present(strategy.positioning.as_ref()) else {
        return CheckOutcome::skipped("no positioning statement to compare against");
    };
    let messages: Vec<&str> = strategy
        .key_messages
        .iter()
        .map(|message| message.trim())
        .filter(|message| !message.is_empty())
        .collect();
    if messages.is_empty() {
        return CheckOutcome::skipped("no key messages to compare against");
    }

    let combined = messages.join(" ");
    let shared = shared_terms(statement, &combined);
    if shared.is_empty() {
        return CheckOutcome::warning(60, "key messages do not echo the positioning")
            .with_suggestion("Carry the positioning's core claims into the key messages verbatim.");
    }
    CheckOutcome::pass(100, "key messages echo the positioning vocabulary")
        .with_evidence(shared.join(", "))
}

pub fn values_tone_alignment(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    let values: Vec<String> = strategy
        .values
        .iter()
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .collect();
    let tones: Vec<String> = strategy
        .tone_attributes()
        .iter()
        .map(|attribute| attribute.trim().to_lowercase())
        .filter(|attribute| !attribute.is_empty())
        .collect();
    if values.is_empty() || tones.is_empty() {
        return CheckOutcome::skipped("values and tone attributes are not both defined");
    }

    let echoed: Vec<&String> = tones
        .iter()
        .filter(|tone| {
            values
                .iter()
                .any(|value| value.contains(tone.as_str()) || tone.contains(value.as_str()))
        })
        .collect();

    if echoed.is_empty() {
        return CheckOutcome::warning(60, "tone attributes do not reflect the stated values")
            .with_suggestion("Derive at least one tone attribute directly from a core value.");
    }
    CheckOutcome::pass(100, "tone attributes reflect the stated values").with_evidence(
        echoed
            .iter()
            .map(|tone| tone.to_string())
            .collect::<Vec<String>>()
            .join(", "),
    )
}
