pub mod evidence;
pub mod foundation;
pub mod implementation;
pub mod messaging;
pub mod personality;
pub mod positioning;

use crate::context::ValidationContext;
use crate::model::{BrandStrategy, CheckStatus, CheckpointResult, Severity};

/// A checkpoint validator: pure, deterministic, no I/O and no input
/// mutation. Identical `(strategy, context)` must yield identical outcomes.
pub type ValidatorFn = fn(&BrandStrategy, Option<&ValidationContext>) -> CheckOutcome;

/// One immutable entry of the static checkpoint catalogue.
pub struct QualityCheckpoint {
    pub id: &'static str,
    pub category: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub severity: Severity,
    pub validator: ValidatorFn,
}

/// Weighted grouping of checkpoints. Weights are convex-combination
/// coefficients over category means and must sum to 1.0 (verified by the
/// engine at startup).
pub struct CheckpointCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub weight: f64,
}

/// What a validator produces; the engine attaches the checkpoint id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub status: CheckStatus,
    pub score: u32,
    pub message: String,
    pub details: Option<String>,
    pub evidence: Vec<String>,
    pub suggestions: Vec<String>,
}

impl CheckOutcome {
    fn new(status: CheckStatus, score: u32, message: impl Into<String>) -> Self {
        Self {
            status,
            score,
            message: message.into(),
            details: None,
            evidence: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn pass(score: u32, message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Pass, score, message)
    }

    pub fn warning(score: u32, message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Warning, score, message)
    }

    pub fn fail(score: u32, message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Fail, score, message)
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Skipped, 0, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_evidence(mut self, excerpt: impl Into<String>) -> Self {
        self.evidence.push(excerpt.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn into_result(self, checkpoint_id: &str) -> CheckpointResult {
        CheckpointResult {
            checkpoint_id: checkpoint_id.to_string(),
            status: self.status,
            score: self.score.min(100),
            message: self.message,
            details: self.details,
            evidence: self.evidence,
            suggestions: self.suggestions,
        }
    }
}

pub const CATEGORIES: &[CheckpointCategory] = &[
    CheckpointCategory {
        id: "foundation",
        name: "Brand Foundation",
        description: "Purpose, mission, vision, and core values",
        weight: 0.25,
    },
    CheckpointCategory {
        id: "positioning",
        name: "Market Positioning",
        description: "Positioning statement and differentiators",
        weight: 0.25,
    },
    CheckpointCategory {
        id: "messaging",
        name: "Messaging Framework",
        description: "Key messages, voice, and tone",
        weight: 0.20,
    },
    CheckpointCategory {
        id: "personality",
        name: "Personality & Coherence",
        description: "Brand personality traits and cross-field consistency",
        weight: 0.10,
    },
    CheckpointCategory {
        id: "evidence",
        name: "Market Intelligence",
        description: "Grounding in upstream research, audits, and sources",
        weight: 0.15,
    },
    CheckpointCategory {
        id: "implementation",
        name: "Implementation Readiness",
        description: "Whether the strategy is actionable as written",
        weight: 0.05,
    },
];

pub const CATALOGUE: &[QualityCheckpoint] = &[
    // foundation
    QualityCheckpoint {
        id: "foundation-purpose",
        category: "foundation",
        name: "Purpose defined",
        description: "A substantive brand purpose exists",
        severity: Severity::Critical,
        validator: foundation::purpose_defined,
    },
    QualityCheckpoint {
        id: "foundation-purpose-action",
        category: "foundation",
        name: "Purpose is actionable",
        description: "The purpose uses action language, not static description",
        severity: Severity::Medium,
        validator: foundation::purpose_actionable,
    },
    QualityCheckpoint {
        id: "foundation-mission",
        category: "foundation",
        name: "Mission defined",
        description: "A substantive mission statement exists",
        severity: Severity::High,
        validator: foundation::mission_defined,
    },
    QualityCheckpoint {
        id: "foundation-vision",
        category: "foundation",
        name: "Vision is aspirational",
        description: "A vision exists and points at a future state",
        severity: Severity::High,
        validator: foundation::vision_aspirational,
    },
    QualityCheckpoint {
        id: "foundation-values-count",
        category: "foundation",
        name: "Core values count",
        description: "Between 3 and 7 core values are defined",
        severity: Severity::Medium,
        validator: foundation::values_count,
    },
    QualityCheckpoint {
        id: "foundation-values-distinct",
        category: "foundation",
        name: "Values are distinct",
        description: "Core values are non-duplicate and substantive",
        severity: Severity::Low,
        validator: foundation::values_distinct,
    },
    // positioning
    QualityCheckpoint {
        id: "positioning-statement",
        category: "positioning",
        name: "Positioning statement defined",
        description: "A substantive positioning statement exists",
        severity: Severity::Critical,
        validator: positioning::statement_defined,
    },
    QualityCheckpoint {
        id: "positioning-audience",
        category: "positioning",
        name: "Audience named",
        description: "The positioning names who the brand serves",
        severity: Severity::High,
        validator: positioning::audience_named,
    },
    QualityCheckpoint {
        id: "positioning-differentiation",
        category: "positioning",
        name: "Differentiation language",
        description: "The positioning claims a distinct place in the market",
        severity: Severity::High,
        validator: positioning::differentiation_language,
    },
    QualityCheckpoint {
        id: "positioning-differentiator-count",
        category: "positioning",
        name: "Differentiator count",
        description: "At least 3 substantive differentiators are listed",
        severity: Severity::High,
        validator: positioning::differentiator_count,
    },
    QualityCheckpoint {
        id: "positioning-differentiator-specificity",
        category: "positioning",
        name: "Differentiators are specific",
        description: "Differentiators carry concrete, checkable claims",
        severity: Severity::Medium,
        validator: positioning::differentiator_specificity,
    },
    // messaging
    QualityCheckpoint {
        id: "messaging-key-messages",
        category: "messaging",
        name: "Key messages present",
        description: "At least one key message exists",
        severity: Severity::Critical,
        validator: messaging::key_messages_present,
    },
    QualityCheckpoint {
        id: "messaging-message-count",
        category: "messaging",
        name: "Key message count",
        description: "Between 3 and 7 key messages are defined",
        severity: Severity::Medium,
        validator: messaging::message_count,
    },
    QualityCheckpoint {
        id: "messaging-message-substance",
        category: "messaging",
        name: "Messages are substantive",
        description: "Each key message is a usable sentence, not a fragment",
        severity: Severity::Medium,
        validator: messaging::message_substance,
    },
    QualityCheckpoint {
        id: "messaging-voice",
        category: "messaging",
        name: "Voice defined",
        description: "A brand voice description exists",
        severity: Severity::High,
        validator: messaging::voice_defined,
    },
    QualityCheckpoint {
        id: "messaging-tone-attributes",
        category: "messaging",
        name: "Tone attributes",
        description: "Between 2 and 6 tone attributes are defined",
        severity: Severity::Medium,
        validator: messaging::tone_attributes,
    },
    // personality
    QualityCheckpoint {
        id: "personality-traits-count",
        category: "personality",
        name: "Personality traits count",
        description: "Between 3 and 6 personality traits are defined",
        severity: Severity::Medium,
        validator: personality::traits_count,
    },
    QualityCheckpoint {
        id: "personality-traits-distinctive",
        category: "personality",
        name: "Traits are distinctive",
        description: "Personality traits avoid generic filler words",
        severity: Severity::Low,
        validator: personality::traits_distinctive,
    },
    QualityCheckpoint {
        id: "personality-purpose-mission-alignment",
        category: "personality",
        name: "Purpose and mission aligned",
        description: "Purpose and mission share thematic vocabulary",
        severity: Severity::Medium,
        validator: personality::purpose_mission_alignment,
    },
    QualityCheckpoint {
        id: "personality-positioning-message-alignment",
        category: "personality",
        name: "Positioning and messages aligned",
        description: "Key messages echo the positioning vocabulary",
        severity: Severity::Medium,
        validator: personality::positioning_message_alignment,
    },
    QualityCheckpoint {
        id: "personality-values-tone-alignment",
        category: "personality",
        name: "Values and tone aligned",
        description: "Tone attributes reflect the stated values",
        severity: Severity::Low,
        validator: personality::values_tone_alignment,
    },
    // evidence
    QualityCheckpoint {
        id: "evidence-research-context",
        category: "evidence",
        name: "Research context present",
        description: "Upstream research or audit material was supplied",
        severity: Severity::High,
        validator: evidence::research_context_present,
    },
    QualityCheckpoint {
        id: "evidence-audience-grounding",
        category: "evidence",
        name: "Audience grounded in research",
        description: "Positioning vocabulary appears in the research material",
        severity: Severity::Medium,
        validator: evidence::audience_grounding,
    },
    QualityCheckpoint {
        id: "evidence-differentiator-grounding",
        category: "evidence",
        name: "Differentiators grounded in research",
        description: "Differentiator claims appear in the research material",
        severity: Severity::Medium,
        validator: evidence::differentiator_grounding,
    },
    QualityCheckpoint {
        id: "evidence-sources-cited",
        category: "evidence",
        name: "Sources cited",
        description: "Supporting sources are attached to the context",
        severity: Severity::Medium,
        validator: evidence::sources_cited,
    },
    QualityCheckpoint {
        id: "evidence-source-credibility",
        category: "evidence",
        name: "Source credibility",
        description: "At least one cited source is tier 1 or tier 2",
        severity: Severity::Low,
        validator: evidence::source_credibility,
    },
    // implementation
    QualityCheckpoint {
        id: "implementation-voice-guidance",
        category: "implementation",
        name: "Voice guidance usable",
        description: "Voice plus tone attributes give writers enough direction",
        severity: Severity::Medium,
        validator: implementation::voice_guidance_usable,
    },
    QualityCheckpoint {
        id: "implementation-message-deployability",
        category: "implementation",
        name: "Messages deployable",
        description: "Key messages fit real placements without rewriting",
        severity: Severity::Medium,
        validator: implementation::message_deployability,
    },
    QualityCheckpoint {
        id: "implementation-audit-follow-through",
        category: "implementation",
        name: "Audit findings reflected",
        description: "The strategy responds to prior audit findings",
        severity: Severity::Low,
        validator: implementation::audit_follow_through,
    },
];

pub fn checkpoint_by_id(id: &str) -> Option<&'static QualityCheckpoint> {
    CATALOGUE.iter().find(|checkpoint| checkpoint.id == id)
}

pub fn checkpoint_ids_in_category(category_id: &str) -> Vec<String> {
    CATALOGUE
        .iter()
        .filter(|checkpoint| checkpoint.category == category_id)
        .map(|checkpoint| checkpoint.id.to_string())
        .collect()
}

// Short common words excluded from thematic-vocabulary comparisons. Domain
// boilerplate ("brand", "company") is excluded too since it matches any two
// fields of any strategy.
const STOPWORDS: &[&str] = &[
    "about", "after", "again", "their", "there", "these", "those", "through", "where", "which",
    "while", "would", "could", "should", "every", "being", "other", "because", "between", "before",
    "brand", "brands", "company", "companies", "business", "businesses", "customer", "customers",
    "people", "world", "better", "great", "really", "always", "never", "using", "within", "without",
];

/// Lowercase thematic terms of a text: alphabetic words of 5+ characters
/// minus stopwords, de-duplicated preserving first occurrence.
pub(crate) fn significant_terms(text: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for word in text.split(|ch: char| !ch.is_alphabetic()) {
        if word.len() < 5 {
            continue;
        }
        let term = word.to_lowercase();
        if STOPWORDS.contains(&term.as_str()) {
            continue;
        }
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

/// Thematic terms that two texts share, in first-text order.
pub(crate) fn shared_terms(left: &str, right: &str) -> Vec<String> {
    let right_terms = significant_terms(right);
    significant_terms(left)
        .into_iter()
        .filter(|term| right_terms.contains(term))
        .collect()
}

/// First 80 characters of a text, used as verbatim pass evidence.
pub(crate) fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= 80 {
        return trimmed.to_string();
    }
    let head: String = trimmed.chars().take(80).collect();
    format!("{head}…")
}

/// Non-empty trimmed view of an optional free-text field.
pub(crate) fn present(field: Option<&String>) -> Option<&str> {
    field.map(|value| value.trim()).filter(|value| !value.is_empty())
}
