//! Content generation for a single section.

use crate::backend::{complete_blocking, TextBackend};
use crate::prompt::section_prompt;
use docforge_core::{BackendError, ContentSanitizer, DocumentKind, Error, Result, SanitizeMode};
use std::sync::Arc;

/// Generates sanitized content for one section with one backend call.
#[derive(Clone)]
pub struct SectionContentGenerator {
    backend: Arc<dyn TextBackend>,
    sanitizer: ContentSanitizer,
}

impl SectionContentGenerator {
    pub fn new(backend: Arc<dyn TextBackend>) -> Self {
        Self {
            backend,
            sanitizer: ContentSanitizer::new(),
        }
    }

    /// Generate content for `title`.
    ///
    /// `target_length` is a word target for flow content and a verbosity
    /// bound for deck bullets. Any backend failure, or a completion that
    /// sanitizes to nothing, fails naming the section.
    pub async fn generate(
        &self,
        topic: &str,
        title: &str,
        kind: DocumentKind,
        context: &str,
        target_length: usize,
    ) -> Result<String> {
        let prompt = section_prompt(topic, title, kind, context, target_length);
        log::debug!("Generating '{}' ({} chars of context)", title, context.chars().count());

        let raw = complete_blocking(&self.backend, prompt)
            .await
            .map_err(|source| Error::SectionGeneration {
                section: title.to_string(),
                source,
            })?;

        let content = self.sanitizer.sanitize(&raw, SanitizeMode::for_kind(kind));
        if content.is_empty() {
            return Err(Error::SectionGeneration {
                section: title.to_string(),
                source: BackendError::new("backend returned no usable content"),
            });
        }

        Ok(content)
    }
}
