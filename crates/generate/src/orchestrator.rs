//! Sequential, context-threaded generation across a document's sections.
//!
//! Sections are generated strictly in ascending `order`, one backend call at
//! a time, because each prompt carries excerpts of the sections before it.
//! A failure stops the run; sections already generated keep their new
//! content and nothing is rolled back. The same holds if the caller drops
//! the future mid-run.

use crate::section::SectionContentGenerator;
use crate::TextBackend;
use docforge_core::{Document, Error, GenerationPolicy, Result, Section};
use std::sync::Arc;

/// Running context for one generation pass.
///
/// Entries are appended while the text is shorter than the cap; once the cap
/// is reached the context freezes. Nothing is ever evicted.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    text: String,
    cap: usize,
    excerpt: usize,
}

impl GenerationContext {
    /// Create an empty context.
    pub fn new(cap: usize, excerpt: usize) -> Self {
        Self {
            text: String::new(),
            cap,
            excerpt,
        }
    }

    /// Create an empty context sized by `policy`.
    pub fn from_policy(policy: &GenerationPolicy) -> Self {
        Self::new(policy.context_cap, policy.context_excerpt)
    }

    /// Append `"{title}: {excerpt}..."` unless the context is frozen.
    ///
    /// Returns whether anything was appended.
    pub fn record(&mut self, title: &str, content: &str) -> bool {
        if self.is_frozen() {
            return false;
        }
        if !self.text.is_empty() {
            self.text.push_str("\n\n");
        }
        self.text.push_str(&excerpt_entry(title, content, self.excerpt));
        true
    }

    /// Whether the cap has been reached.
    pub fn is_frozen(&self) -> bool {
        self.char_len() >= self.cap
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Outcome of a completed whole-document run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of sections that received content.
    pub generated: usize,
    /// Final context length in characters.
    pub context_chars: usize,
}

/// Drives [`SectionContentGenerator`] over a document.
pub struct GenerationOrchestrator {
    generator: SectionContentGenerator,
    policy: GenerationPolicy,
}

impl GenerationOrchestrator {
    /// Create an orchestrator using the default policy.
    pub fn new(backend: Arc<dyn TextBackend>) -> Self {
        Self {
            generator: SectionContentGenerator::new(backend),
            policy: GenerationPolicy::default(),
        }
    }

    /// Use a custom policy.
    pub fn with_policy(mut self, policy: GenerationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Generate content for every section of `document`, in order.
    ///
    /// On failure at a section, earlier sections keep the content written in
    /// this run, and that section and all later ones are left untouched.
    pub async fn run(&self, document: &mut Document) -> Result<RunSummary> {
        if document.sections.is_empty() {
            return Err(Error::Validation(
                "Document has no sections to generate content for".to_string(),
            ));
        }

        let kind = document.kind();
        let target_length = self.policy.target_length(kind);
        let delay = self.policy.inter_call_delay();
        let order = document.order_indices();
        let mut context = GenerationContext::from_policy(&self.policy);

        log::info!(
            "Generating {} sections for document {} ('{}')",
            order.len(),
            document.id,
            document.title
        );

        for (position, &index) in order.iter().enumerate() {
            if position > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let title = document.sections[index].title.clone();
            let content = self
                .generator
                .generate(&document.topic, &title, kind, context.as_str(), target_length)
                .await
                .inspect_err(|e| log::warn!("Stopping generation at '{}': {}", title, e))?;

            if !context.record(&title, &content) {
                log::debug!("Context frozen at {} chars", context.char_len());
            }
            document.sections[index].content = Some(content);
        }

        Ok(RunSummary {
            generated: order.len(),
            context_chars: context.char_len(),
        })
    }

    /// Regenerate a single section.
    ///
    /// The context is built from the preceding sections only (by order, at
    /// most `regeneration_window` of them, each cut to
    /// `regeneration_excerpt` characters) and is not subject to the
    /// whole-document cap.
    pub async fn regenerate_section(&self, document: &mut Document, section_id: u64) -> Result<()> {
        let section = document.section(section_id).ok_or_else(|| {
            Error::Validation(format!(
                "Section {} not found in document {}",
                section_id, document.id
            ))
        })?;
        let title = section.title.clone();
        let context = self.regeneration_context(document, section);

        let content = self
            .generator
            .generate(
                &document.topic,
                &title,
                document.kind(),
                &context,
                self.policy.target_length(document.kind()),
            )
            .await?;

        if let Some(section) = document.section_mut(section_id) {
            section.content = Some(content);
        }
        Ok(())
    }

    fn regeneration_context(&self, document: &Document, target: &Section) -> String {
        let previous: Vec<&Section> = document
            .sections_in_order()
            .into_iter()
            .filter(|s| s.order < target.order)
            .collect();
        let start = previous.len().saturating_sub(self.policy.regeneration_window);

        previous[start..]
            .iter()
            .filter_map(|s| {
                s.text()
                    .map(|text| excerpt_entry(&s.title, text, self.policy.regeneration_excerpt))
            })
            .map(|entry| entry + "\n")
            .collect()
    }
}

fn excerpt_entry(title: &str, content: &str, excerpt: usize) -> String {
    let head: String = content.chars().take(excerpt).collect();
    format!("{}: {}...", title, head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::ScriptedBackend;
    use docforge_core::{DocumentKind, ErrorKind};
    use std::time::Duration;

    fn quick_policy() -> GenerationPolicy {
        GenerationPolicy::default().with_inter_call_delay(Duration::ZERO)
    }

    fn three_section_doc(kind: DocumentKind) -> Document {
        Document::new(1, "Report", "Renewable energy", kind)
            .with_section(Section::new(1, "Introduction", 0))
            .with_section(Section::new(2, "Solar", 1).with_content("old solar"))
            .with_section(Section::new(3, "Conclusion", 2))
    }

    #[test]
    fn test_context_freezes_at_cap() {
        let mut context = GenerationContext::new(1000, 200);
        let long = "x".repeat(500);

        let mut lengths = Vec::new();
        for i in 0..10 {
            context.record(&format!("Section {}", i), &long);
            lengths.push(context.char_len());
        }

        assert!(context.is_frozen());
        let frozen_at = lengths.iter().position(|&len| len >= 1000).unwrap();
        assert!(lengths[frozen_at..].iter().all(|&len| len == lengths[frozen_at]));
    }

    #[test]
    fn test_context_entry_format() {
        let mut context = GenerationContext::new(1000, 5);
        context.record("Intro", "abcdefgh");
        context.record("Body", "xyz");
        assert_eq!(context.as_str(), "Intro: abcde...\n\nBody: xyz...");
    }

    #[tokio::test]
    async fn test_run_threads_context_in_order() {
        let backend = Arc::new(
            ScriptedBackend::new()
                .reply("Intro text.")
                .reply("Solar text.")
                .reply("Closing text."),
        );
        let mut doc = three_section_doc(DocumentKind::Flow);
        // Stored out of order; generation follows `order`.
        doc.sections.reverse();

        let summary = GenerationOrchestrator::new(backend.clone())
            .with_policy(quick_policy())
            .run(&mut doc)
            .await
            .unwrap();

        assert_eq!(summary.generated, 3);
        let prompts = backend.prompts();
        assert!(prompts[0].contains("Section Title: Introduction"));
        assert!(!prompts[0].contains("Context"));
        assert!(prompts[1].contains("Introduction: Intro text...."));
        assert!(prompts[2].contains("Solar: Solar text...."));
        assert_eq!(doc.section(3).unwrap().content.as_deref(), Some("Closing text."));
    }

    #[tokio::test]
    async fn test_run_context_stops_growing_after_cap() {
        let long = "word ".repeat(100);
        let mut backend = ScriptedBackend::new();
        let mut doc = Document::new(1, "Deep", "Topic", DocumentKind::Flow);
        for i in 0..8u32 {
            backend = backend.reply(long.clone());
            doc.add_section(Section::new(i as u64, format!("Part {}", i), i));
        }
        let backend = Arc::new(backend);

        let summary = GenerationOrchestrator::new(backend.clone())
            .with_policy(quick_policy())
            .run(&mut doc)
            .await
            .unwrap();

        let contexts: Vec<String> = backend
            .prompts()
            .iter()
            .map(|prompt| {
                prompt
                    .split("Previous Sections Context: ")
                    .nth(1)
                    .and_then(|rest| rest.split("\n\nWrite the content").next())
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();

        // Each entry is 211 chars ("Part N: " + 200 + "..."), joined by a
        // blank line: the fifth entry takes the context to 1063 chars.
        assert_eq!(contexts[4].chars().count(), 850);
        assert_eq!(contexts[5].chars().count(), 1063);
        assert_eq!(contexts[5], contexts[6]);
        assert_eq!(contexts[6], contexts[7]);
        assert_eq!(summary.context_chars, 1063);
    }

    #[tokio::test]
    async fn test_failure_stops_and_keeps_partial_progress() {
        let backend = Arc::new(
            ScriptedBackend::new()
                .reply("New intro.")
                .fail("backend unavailable")
                .reply("never used"),
        );
        let mut doc = three_section_doc(DocumentKind::Deck);

        let err = GenerationOrchestrator::new(backend.clone())
            .with_policy(quick_policy())
            .run(&mut doc)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Generation);
        assert_eq!(err.section_title(), Some("Solar"));
        assert_eq!(backend.calls(), 2);
        assert_eq!(doc.section(1).unwrap().content.as_deref(), Some("New intro."));
        assert_eq!(doc.section(2).unwrap().content.as_deref(), Some("old solar"));
        assert_eq!(doc.section(3).unwrap().content, None);
    }

    #[tokio::test]
    async fn test_empty_document_is_validation_failure() {
        let backend = Arc::new(ScriptedBackend::new());
        let mut doc = Document::new(1, "Empty", "Topic", DocumentKind::Flow);

        let err = GenerationOrchestrator::new(backend.clone())
            .run(&mut doc)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_between_sections() {
        let backend = Arc::new(ScriptedBackend::new().reply("a").reply("b").reply("c"));
        let mut doc = three_section_doc(DocumentKind::Deck);

        let started = tokio::time::Instant::now();
        GenerationOrchestrator::new(backend)
            .run(&mut doc)
            .await
            .unwrap();

        // Two pauses of 500ms between three sections.
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_regenerate_uses_two_previous_sections() {
        let backend = Arc::new(ScriptedBackend::new().reply("Fresh content."));
        let mut doc = Document::new(1, "Doc", "Topic", DocumentKind::Flow)
            .with_section(Section::new(1, "One", 0).with_content("first"))
            .with_section(Section::new(2, "Two", 1).with_content("y".repeat(400)))
            .with_section(Section::new(3, "Three", 2).with_content("third"))
            .with_section(Section::new(4, "Four", 3).with_content("stale"))
            .with_section(Section::new(5, "Five", 4).with_content("after"));

        GenerationOrchestrator::new(backend.clone())
            .with_policy(quick_policy())
            .regenerate_section(&mut doc, 4)
            .await
            .unwrap();

        let prompt = &backend.prompts()[0];
        assert!(!prompt.contains("One: first"));
        assert!(prompt.contains(&format!("Two: {}...", "y".repeat(150))));
        assert!(!prompt.contains(&"y".repeat(151)));
        assert!(prompt.contains("Three: third..."));
        assert!(!prompt.contains("after"));
        assert_eq!(doc.section(4).unwrap().content.as_deref(), Some("Fresh content."));
        assert_eq!(doc.section(5).unwrap().content.as_deref(), Some("after"));
    }

    #[tokio::test]
    async fn test_regenerate_first_section_has_no_context() {
        let backend = Arc::new(ScriptedBackend::new().reply("- Bullet"));
        let mut doc = three_section_doc(DocumentKind::Deck);

        GenerationOrchestrator::new(backend.clone())
            .regenerate_section(&mut doc, 1)
            .await
            .unwrap();

        assert!(!backend.prompts()[0].contains("Context"));
        assert_eq!(doc.section(1).unwrap().content.as_deref(), Some("Bullet"));
    }

    #[tokio::test]
    async fn test_regenerate_unknown_section() {
        let backend = Arc::new(ScriptedBackend::new());
        let mut doc = three_section_doc(DocumentKind::Flow);

        let err = GenerationOrchestrator::new(backend.clone())
            .regenerate_section(&mut doc, 99)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_regenerate_failure_leaves_content() {
        let backend = Arc::new(ScriptedBackend::new().fail("boom"));
        let mut doc = three_section_doc(DocumentKind::Flow);

        let err = GenerationOrchestrator::new(backend)
            .regenerate_section(&mut doc, 2)
            .await
            .unwrap_err();

        assert_eq!(err.section_title(), Some("Solar"));
        assert_eq!(doc.section(2).unwrap().content.as_deref(), Some("old solar"));
    }
}
