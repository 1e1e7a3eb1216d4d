//! Rewriting an existing section from a user instruction.

use crate::backend::{complete_blocking, TextBackend};
use crate::prompt::refinement_prompt;
use docforge_core::{
    BackendError, ContentSanitizer, Document, Error, RefinementRecord, Result, SanitizeMode,
};
use std::sync::Arc;

/// Applies user refinement requests to generated sections.
pub struct Refiner {
    backend: Arc<dyn TextBackend>,
    sanitizer: ContentSanitizer,
}

impl Refiner {
    pub fn new(backend: Arc<dyn TextBackend>) -> Self {
        Self {
            backend,
            sanitizer: ContentSanitizer::new(),
        }
    }

    /// Rewrite the content of `section_id` following `instruction`.
    ///
    /// The section must already have content. On success its content is
    /// replaced and the returned record holds both versions for the caller's
    /// history; on failure the section is unchanged.
    pub async fn refine(
        &self,
        document: &mut Document,
        section_id: u64,
        instruction: &str,
    ) -> Result<RefinementRecord> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(Error::Validation(
                "Refinement instruction must not be empty".to_string(),
            ));
        }

        let mode = SanitizeMode::for_kind(document.kind());
        let section = document.section(section_id).ok_or_else(|| {
            Error::Validation(format!(
                "Section {} not found in document {}",
                section_id, document.id
            ))
        })?;
        let previous = section.text().map(str::to_string).ok_or_else(|| {
            Error::Validation(format!(
                "Cannot refine section '{}' without existing content",
                section.title
            ))
        })?;
        let title = section.title.clone();

        log::info!("Refining section '{}'", title);
        let raw = complete_blocking(&self.backend, refinement_prompt(&previous, instruction))
            .await
            .map_err(|source| Error::SectionGeneration {
                section: title.clone(),
                source,
            })?;

        let refined = self.sanitizer.sanitize(&raw, mode);
        if refined.is_empty() {
            return Err(Error::SectionGeneration {
                section: title,
                source: BackendError::new("backend returned no usable content"),
            });
        }

        if let Some(section) = document.section_mut(section_id) {
            section.content = Some(refined.clone());
        }

        Ok(RefinementRecord {
            section_id,
            prompt: instruction.to_string(),
            previous_content: previous,
            new_content: refined,
        })
    }
}
