//! Outline synthesis: topic in, exactly `count` section titles out.

use crate::backend::{complete_blocking, TextBackend};
use crate::prompt::outline_prompt;
use docforge_core::{
    ContentSanitizer, DocumentKind, Error, GenerationPolicy, OutlineEntry, Result,
};
use std::sync::Arc;

/// Produces ordered section titles for a topic with a single backend call.
pub struct OutlineSynthesizer {
    backend: Arc<dyn TextBackend>,
    sanitizer: ContentSanitizer,
    policy: GenerationPolicy,
}

impl OutlineSynthesizer {
    /// Create a synthesizer using the default policy.
    pub fn new(backend: Arc<dyn TextBackend>) -> Self {
        Self {
            backend,
            sanitizer: ContentSanitizer::new(),
            policy: GenerationPolicy::default(),
        }
    }

    /// Use a custom policy.
    pub fn with_policy(mut self, policy: GenerationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Synthesize exactly `count` titles.
    ///
    /// Short responses are padded with `"Additional Section N"` placeholders
    /// and long ones truncated. A `count` outside the policy range fails
    /// before the backend is called.
    pub async fn synthesize(
        &self,
        topic: &str,
        kind: DocumentKind,
        count: usize,
    ) -> Result<Vec<String>> {
        let range = self.policy.section_range();
        if !range.contains(&count) {
            return Err(Error::Validation(format!(
                "Section count must be between {} and {}, got {}",
                range.start(),
                range.end(),
                count
            )));
        }

        log::info!("Requesting {} outline for '{}' ({} titles)", kind, topic, count);
        let response = complete_blocking(&self.backend, outline_prompt(topic, kind, count))
            .await
            .map_err(Error::OutlineGeneration)?;

        let mut titles = self.sanitizer.parse_outline_titles(&response);
        log::debug!("Parsed {} titles from outline response", titles.len());

        if titles.len() < count {
            log::warn!(
                "Outline response had {} titles, padding to {}",
                titles.len(),
                count
            );
        }
        titles.truncate(count);
        while titles.len() < count {
            titles.push(format!("Additional Section {}", titles.len() + 1));
        }

        Ok(titles)
    }

    /// Synthesize titles as outline entries with 0-based order.
    pub async fn synthesize_entries(
        &self,
        topic: &str,
        kind: DocumentKind,
        count: usize,
    ) -> Result<Vec<OutlineEntry>> {
        let titles = self.synthesize(topic, kind, count).await?;
        Ok(titles
            .into_iter()
            .enumerate()
            .map(|(order, title)| OutlineEntry {
                title,
                order: order as u32,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::ScriptedBackend;
    use docforge_core::ErrorKind;

    fn synthesizer(backend: &Arc<ScriptedBackend>) -> OutlineSynthesizer {
        OutlineSynthesizer::new(backend.clone())
    }

    #[tokio::test]
    async fn test_exact_count() {
        let backend = Arc::new(
            ScriptedBackend::new().reply("1. Introduction\n2. Causes\n3. Effects\n4. Conclusion"),
        );
        let titles = synthesizer(&backend)
            .synthesize("Climate", DocumentKind::Flow, 4)
            .await
            .unwrap();

        assert_eq!(titles, vec!["Introduction", "Causes", "Effects", "Conclusion"]);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_pads_short_response() {
        let backend = Arc::new(ScriptedBackend::new().reply("1. Introduction\n2. Conclusion"));
        let titles = synthesizer(&backend)
            .synthesize("Climate", DocumentKind::Deck, 5)
            .await
            .unwrap();

        assert_eq!(
            titles,
            vec![
                "Introduction",
                "Conclusion",
                "Additional Section 3",
                "Additional Section 4",
                "Additional Section 5"
            ]
        );
    }

    #[tokio::test]
    async fn test_truncates_long_response() {
        let response: String = (1..=10).map(|i| format!("{}. Title {}\n", i, i)).collect();
        let backend = Arc::new(ScriptedBackend::new().reply(response));
        let titles = synthesizer(&backend)
            .synthesize("Topic", DocumentKind::Flow, 3)
            .await
            .unwrap();

        assert_eq!(titles, vec!["Title 1", "Title 2", "Title 3"]);
    }

    #[tokio::test]
    async fn test_always_returns_count_in_range() {
        for count in 3..=15 {
            let backend = Arc::new(ScriptedBackend::new().reply("- One\n- Two\n- Three\n- Four"));
            let titles = synthesizer(&backend)
                .synthesize("Topic", DocumentKind::Deck, count)
                .await
                .unwrap();
            assert_eq!(titles.len(), count);
        }
    }

    #[tokio::test]
    async fn test_rejects_out_of_range_without_backend_call() {
        for count in [0, 2, 16, 100] {
            let backend = Arc::new(ScriptedBackend::new().reply("1. Unused"));
            let err = synthesizer(&backend)
                .synthesize("Topic", DocumentKind::Flow, count)
                .await
                .unwrap_err();

            assert_eq!(err.kind(), ErrorKind::Validation);
            assert_eq!(backend.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_backend_failure() {
        let backend = Arc::new(ScriptedBackend::new().fail("rate limited"));
        let err = synthesizer(&backend)
            .synthesize("Topic", DocumentKind::Flow, 3)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Generation);
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn test_entries_are_zero_based() {
        let backend = Arc::new(ScriptedBackend::new().reply("1. A\n2. B\n3. C"));
        let entries = synthesizer(&backend)
            .synthesize_entries("Topic", DocumentKind::Deck, 3)
            .await
            .unwrap();

        assert_eq!(entries[0], OutlineEntry { title: "A".into(), order: 0 });
        assert_eq!(entries[2].order, 2);
    }
}
