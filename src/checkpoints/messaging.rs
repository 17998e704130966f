use super::{CheckOutcome, excerpt};
use crate::context::ValidationContext;
use crate::model::BrandStrategy;

const MESSAGES_MIN: usize = 3;
const MESSAGES_MAX: usize = 7;
const MESSAGE_MIN_CHARS: usize = 20;
const MESSAGE_MAX_CHARS: usize = 200;
const VOICE_MIN_CHARS: usize = 10;
const TONE_MIN: usize = 2;
const TONE_MAX: usize = 6;

pub fn key_messages_present(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    if strategy.key_messages.iter().all(|message| message.trim().is_empty()) {
        return CheckOutcome::fail(0, "no key messages are defined")
            .with_suggestion("Write 3 to 7 key messages the brand repeats in every channel.");
    }
    CheckOutcome::pass(100, "key messages are defined")
}

pub fn message_count(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    let count = strategy
        .key_messages
        .iter()
        .filter(|message| !message.trim().is_empty())
        .count();
    if count == 0 {
        return CheckOutcome::skipped("no key messages to assess");
    }
    if count < MESSAGES_MIN {
        return CheckOutcome::warning(50, format!("only {count} key messages are defined"))
            .with_suggestion("Add key messages until at least 3 are defined.");
    }
    if count > MESSAGES_MAX {
        return CheckOutcome::warning(70, format!("{count} key messages are too many to stay consistent"))
            .with_suggestion("Consolidate the message list down to at most 7 entries.");
    }
    CheckOutcome::pass(100, format!("{count} key messages are defined"))
}

pub fn message_substance(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    let messages: Vec<&str> = strategy
        .key_messages
        .iter()
        .map(|message| message.trim())
        .filter(|message| !message.is_empty())
        .collect();
    if messages.is_empty() {
        return CheckOutcome::skipped("no key messages to assess");
    }

    let usable = messages
        .iter()
        .filter(|message| (MESSAGE_MIN_CHARS..=MESSAGE_MAX_CHARS).contains(&message.len()))
        .count();

    if usable == messages.len() {
        return CheckOutcome::pass(100, "every key message is a usable sentence");
    }
    let off = messages.len() - usable;
    if usable * 2 >= messages.len() {
        CheckOutcome::warning(60, format!("{off} key messages are fragments or walls of text"))
            .with_suggestion("Rewrite each message as one full sentence of 20 to 200 characters.")
    } else {
        CheckOutcome::warning(30, "most key messages are not usable as written")
            .with_details(format!("{usable} of {} fall in the usable length window", messages.len()))
            .with_suggestion("Rewrite each message as one full sentence of 20 to 200 characters.")
    }
}

pub fn voice_defined(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    match strategy.voice() {
        None => CheckOutcome::fail(0, "no brand voice is defined")
            .with_suggestion("Describe the brand voice in a sentence a copywriter could follow."),
        Some(voice) if voice.len() < VOICE_MIN_CHARS => {
            CheckOutcome::warning(50, "voice description is a single word")
                .with_details(voice.to_string())
                .with_suggestion("Expand the voice description beyond a single adjective.")
        }
        Some(voice) => CheckOutcome::pass(100, "brand voice is defined").with_evidence(excerpt(voice)),
    }
}

pub fn tone_attributes(strategy: &BrandStrategy, _context: Option<&ValidationContext>) -> CheckOutcome {
    let count = strategy
        .tone_attributes()
        .iter()
        .filter(|attribute| !attribute.trim().is_empty())
        .count();
    if count == 0 {
        return CheckOutcome::fail(0, "no tone attributes are defined")
            .with_suggestion("List 2 to 6 tone attributes that qualify the voice per situation.");
    }
    if count < TONE_MIN {
        return CheckOutcome::warning(50, "a single tone attribute gives writers no range")
            .with_suggestion("Add tone attributes until at least 2 are defined.");
    }
    if count > TONE_MAX {
        return CheckOutcome::warning(70, format!("{count} tone attributes blur into noise"))
            .with_suggestion("Trim the tone attribute list down to at most 6 entries.");
    }
    CheckOutcome::pass(100, format!("{count} tone attributes are defined"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BrandStrategy, CheckStatus, VoiceAndTone};

    #[test]
    fn missing_key_messages_fail_with_zero_score() {
        let outcome = key_messages_present(&BrandStrategy::default(), None);
        assert_eq!(outcome.status, CheckStatus::Fail);
        assert_eq!(outcome.score, 0);

        let blank = BrandStrategy {
            key_messages: vec!["   ".to_string()],
            ..BrandStrategy::default()
        };
        assert_eq!(key_messages_present(&blank, None).status, CheckStatus::Fail);
    }

    #[test]
    fn count_check_skips_when_presence_check_already_failed() {
        let outcome = message_count(&BrandStrategy::default(), None);
        assert_eq!(outcome.status, CheckStatus::Skipped);
    }

    #[test]
    fn three_to_seven_messages_pass_the_count_window() {
        let strategy = BrandStrategy {
            key_messages: vec![
                "Ship in days, not months".to_string(),
                "Own your customer list outright".to_string(),
                "Pricing that scales with you".to_string(),
            ],
            ..BrandStrategy::default()
        };
        let outcome = message_count(&strategy, None);
        assert_eq!(outcome.status, CheckStatus::Pass);
        assert_eq!(outcome.score, 100);
    }

    #[test]
    fn substance_check_flags_fragments_and_walls_of_text() {
        let strategy = BrandStrategy {
            key_messages: vec![
                "Fast".to_string(),
                "Own your customer list outright, forever".to_string(),
            ],
            ..BrandStrategy::default()
        };
        let outcome = message_substance(&strategy, None);
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert_eq!(outcome.score, 60);

        let mostly_bad = BrandStrategy {
            key_messages: vec!["Fast".to_string(), "Cheap".to_string(), "Good".to_string()],
            ..BrandStrategy::default()
        };
        let outcome = message_substance(&mostly_bad, None);
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert_eq!(outcome.score, 30);
    }

    #[test]
    fn voice_and_tone_checks_cover_absent_and_thin_definitions() {
        assert_eq!(voice_defined(&BrandStrategy::default(), None).status, CheckStatus::Fail);
        assert_eq!(tone_attributes(&BrandStrategy::default(), None).status, CheckStatus::Fail);

        let strategy = BrandStrategy {
            voice_and_tone: Some(VoiceAndTone {
                voice: Some("Plain-spoken, confident, never smug".to_string()),
                tone_attributes: vec!["warm".to_string(), "direct".to_string()],
            }),
            ..BrandStrategy::default()
        };
        assert_eq!(voice_defined(&strategy, None).status, CheckStatus::Pass);
        let outcome = tone_attributes(&strategy, None);
        assert_eq!(outcome.status, CheckStatus::Pass);
        assert_eq!(outcome.score, 100);

        let thin = BrandStrategy {
            voice_and_tone: Some(VoiceAndTone {
                voice: Some("Bold".to_string()),
                tone_attributes: vec!["bold".to_string()],
            }),
            ..BrandStrategy::default()
        };
        assert_eq!(voice_defined(&thin, None).score, 50);
        assert_eq!(tone_attributes(&thin, None).score, 50);
    }
}
