use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Optional upstream research and audit material supplied alongside a
/// strategy. `evolution_outputs` and `audit_results` are deliberately opaque:
/// upstream producers emit heterogeneous shapes, so checkpoints probe them by
/// substring search over a serialized dump rather than a rigid schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationContext {
    pub evolution_outputs: Option<Value>,
    pub audit_results: Option<Value>,
    pub sources: Vec<SourceReference>,
}

/// Supporting source citation. `tier` is an ordinal credibility rank,
/// 1 = most credible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReference {
    pub url: String,
    pub tier: u32,
}

impl ValidationContext {
    /// True when any upstream research material is present at all.
    pub fn has_research(&self) -> bool {
        self.evolution_outputs.is_some() || self.audit_results.is_some()
    }

    /// Combined lowercase dump of all research material, or `None` when there
    /// is nothing to probe.
    pub fn research_dump(&self) -> Option<ContextDump> {
        let values: Vec<&Value> = self
            .evolution_outputs
            .iter()
            .chain(self.audit_results.iter())
            .collect();
        if values.is_empty() {
            return None;
        }
        Some(ContextDump::from_values(&values))
    }

    /// Lowercase dump of the audit results alone.
    pub fn audit_dump(&self) -> Option<ContextDump> {
        self.audit_results.as_ref().map(ContextDump::from_value)
    }
}

/// Serialized, lowercased view of opaque context values. Built once per
/// probe so repeated term lookups stay cheap and deterministic.
#[derive(Debug, Clone)]
pub struct ContextDump {
    text: String,
}

impl ContextDump {
    pub fn from_value(value: &Value) -> Self {
        Self {
            text: value.to_string().to_lowercase(),
        }
    }

    pub fn from_values(values: &[&Value]) -> Self {
        let text = values
            .iter()
            .map(|value| value.to_string().to_lowercase())
            .collect::<Vec<String>>()
            .join("\n");
        Self { text }
    }

    pub fn contains_term(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        !needle.is_empty() && self.text.contains(&needle)
    }

    /// Subset of `terms` present in the dump, preserving input order.
    pub fn matching_terms<'a, I>(&self, terms: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        terms
            .into_iter()
            .filter(|term| self.contains_term(term))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dump_probes_nested_values_case_insensitively() {
        let value = json!({
            "competitors": [{ "name": "Acme Corp", "strength": "Enterprise Sales" }],
            "summary": "Developers prefer self-serve onboarding"
        });

        let dump = ContextDump::from_value(&value);
        assert!(dump.contains_term("acme corp"));
        assert!(dump.contains_term("SELF-SERVE"));
        assert!(!dump.contains_term("retail"));
        assert!(!dump.contains_term("   "));
    }

    #[test]
    fn research_dump_combines_evolution_and_audit_material() {
        let context = ValidationContext {
            evolution_outputs: Some(json!({ "theme": "developer velocity" })),
            audit_results: Some(json!({ "finding": "weak differentiation" })),
            sources: Vec::new(),
        };

        let dump = context.research_dump().expect("dump should exist");
        assert!(dump.contains_term("developer velocity"));
        assert!(dump.contains_term("weak differentiation"));
    }

    #[test]
    fn research_dump_is_none_without_context_material() {
        let context = ValidationContext::default();
        assert!(!context.has_research());
        assert!(context.research_dump().is_none());
        assert!(context.audit_dump().is_none());
    }

    #[test]
    fn matching_terms_preserves_input_order() {
        let dump = ContextDump::from_value(&json!("alpha beta gamma"));
        let matched = dump.matching_terms(["gamma", "delta", "alpha"]);
        assert_eq!(matched, vec!["gamma".to_string(), "alpha".to_string()]);
    }
}
