//! Policy constants for outline synthesis and content generation.

use crate::types::DocumentKind;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;

/// Tunable limits for a generation run.
///
/// The defaults are the production policy; tests usually only shorten
/// `inter_call_delay`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationPolicy {
    /// Smallest accepted outline size.
    pub min_sections: usize,
    /// Largest accepted outline size.
    pub max_sections: usize,
    /// Word-count target for flow document sections.
    pub flow_target_words: usize,
    /// Soft bound on bullet verbosity for deck sections.
    pub deck_target_length: usize,
    /// Once the running context reaches this many characters it stops growing.
    pub context_cap: usize,
    /// Characters of each section's content carried into the context.
    pub context_excerpt: usize,
    /// Pause between consecutive backend calls, in milliseconds.
    pub inter_call_delay_ms: u64,
    /// Number of preceding sections used when regenerating one section.
    pub regeneration_window: usize,
    /// Characters of each preceding section carried when regenerating.
    pub regeneration_excerpt: usize,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            min_sections: 3,
            max_sections: 15,
            flow_target_words: 300,
            deck_target_length: 150,
            context_cap: 1000,
            context_excerpt: 200,
            inter_call_delay_ms: 500,
            regeneration_window: 2,
            regeneration_excerpt: 150,
        }
    }
}

impl GenerationPolicy {
    /// Create the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pause between backend calls.
    pub fn with_inter_call_delay(mut self, delay: Duration) -> Self {
        self.inter_call_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Set the context cap.
    pub fn with_context_cap(mut self, cap: usize) -> Self {
        self.context_cap = cap;
        self
    }

    /// Set the flow word-count target.
    pub fn with_flow_target_words(mut self, words: usize) -> Self {
        self.flow_target_words = words.max(1);
        self
    }

    /// Pause between backend calls.
    pub fn inter_call_delay(&self) -> Duration {
        Duration::from_millis(self.inter_call_delay_ms)
    }

    /// Accepted outline sizes.
    pub fn section_range(&self) -> RangeInclusive<usize> {
        self.min_sections..=self.max_sections
    }

    /// Target length passed to the generator for a document kind.
    pub fn target_length(&self, kind: DocumentKind) -> usize {
        match kind {
            DocumentKind::Flow => self.flow_target_words,
            DocumentKind::Deck => self.deck_target_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = GenerationPolicy::default();
        assert_eq!(policy.section_range(), 3..=15);
        assert_eq!(policy.target_length(DocumentKind::Flow), 300);
        assert_eq!(policy.target_length(DocumentKind::Deck), 150);
        assert_eq!(policy.inter_call_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let policy: GenerationPolicy =
            serde_json::from_str(r#"{"context_cap": 400, "inter_call_delay_ms": 0}"#).unwrap();
        assert_eq!(policy.context_cap, 400);
        assert_eq!(policy.inter_call_delay(), Duration::ZERO);
        assert_eq!(policy.context_excerpt, 200);
    }

    #[test]
    fn test_builder() {
        let policy = GenerationPolicy::new()
            .with_inter_call_delay(Duration::from_millis(20))
            .with_context_cap(50);
        assert_eq!(policy.inter_call_delay_ms, 20);
        assert_eq!(policy.context_cap, 50);
    }

    #[test]
    fn test_flow_target_words() {
        let policy = GenerationPolicy::new().with_flow_target_words(120);
        assert_eq!(policy.target_length(DocumentKind::Flow), 120);
        assert_eq!(policy.target_length(DocumentKind::Deck), 150);
        let policy = GenerationPolicy::new().with_flow_target_words(0);
        assert_eq!(policy.target_length(DocumentKind::Flow), 1);
    }
}
