//! Export of generated documents to their output container.
//!
//! Picks the renderer matching the document kind, names the file after the
//! document title and tags the bytes with the container's media type.

use docforge_core::{Document, DocumentKind, Error, RenderedDocument, Result};
use docforge_docx::FlowDocumentRenderer;
use docforge_pptx::SlideDeckRenderer;
use regex::Regex;
use std::sync::LazyLock;

/// Runs of characters that may not appear in an exported filename.
static UNSAFE_FILENAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Alphabetic}\p{Nd}_-]+").unwrap());

/// Stem used when a title has no usable characters.
const FALLBACK_STEM: &str = "document";

/// Renders finished documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOrchestrator {
    flow: FlowDocumentRenderer,
    deck: SlideDeckRenderer,
}

impl ExportOrchestrator {
    /// Create a new export orchestrator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `document` with the renderer for its kind.
    ///
    /// Fails with a validation error when no section has content. Renderer
    /// failures are wrapped in [`Error::Export`]; no partial bytes are
    /// returned.
    pub fn export(&self, document: &Document) -> Result<RenderedDocument> {
        if !document.has_content() {
            return Err(Error::Validation(format!(
                "Document {} has no generated content to export",
                document.id
            )));
        }

        let kind = document.kind();
        log::debug!(
            "Exporting document {} ('{}') as {}",
            document.id,
            document.title,
            kind
        );

        let rendered = match kind {
            DocumentKind::Flow => self.flow.render(document),
            DocumentKind::Deck => self.deck.render(document),
        };
        let bytes = wrap_render_error(kind, rendered)?;

        log::info!("Exported document {} ({} bytes)", document.id, bytes.len());
        Ok(RenderedDocument {
            bytes,
            media_type: kind.media_type(),
            filename: filename(&document.title, kind),
        })
    }
}

fn wrap_render_error(kind: DocumentKind, result: Result<Vec<u8>>) -> Result<Vec<u8>> {
    result.map_err(|source| Error::Export {
        kind,
        source: Box::new(source),
    })
}

/// Derive the download filename from a document title.
///
/// Each run of characters other than letters, digits, hyphens and
/// underscores (spaces included) becomes a single underscore.
pub fn filename(title: &str, kind: DocumentKind) -> String {
    let stem = UNSAFE_FILENAME_REGEX.replace_all(title.trim(), "_");
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem.as_ref() };
    format!("{}.{}", stem, kind.extension())
}
