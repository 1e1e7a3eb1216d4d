//! Flow document (DOCX) renderer.
//!
//! Produces a lead page (title, subtitle, estimated table of contents)
//! followed by one numbered, page-separated block per section with content.

pub mod document;
pub mod layout;
pub mod styles;

pub use layout::FlowLayout;

use docforge_core::{Document, DocumentKind, Result};
use docforge_ooxml::package::content_types;
use docforge_ooxml::rels::rel_types;
use docforge_ooxml::{props, Package, Relationships};

const MAIN_PART: &str = "word/document.xml";

/// Renders documents into WordprocessingML packages.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowDocumentRenderer;

impl FlowDocumentRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self
    }

    /// Render `document` into `.docx` bytes.
    pub fn render(&self, document: &Document) -> Result<Vec<u8>> {
        if document.kind() != DocumentKind::Flow {
            log::warn!(
                "Rendering {} document {} as a flow document",
                document.kind(),
                document.id
            );
        }

        let layout = FlowLayout::from_document(document);
        log::debug!(
            "Laid out '{}' with {} sections",
            layout.title,
            layout.sections.len()
        );

        let mut document_rels = Relationships::new();
        document_rels.add(rel_types::STYLES, "styles.xml");
        document_rels.add(rel_types::SETTINGS, "settings.xml");

        let mut package = Package::new();
        package.add_rels("_rels/.rels", Relationships::package_root(MAIN_PART).to_xml()?);
        package.add_part(
            MAIN_PART,
            content_types::WORD_DOCUMENT,
            document::document_xml(&layout)?,
        );
        package.add_rels("word/_rels/document.xml.rels", document_rels.to_xml()?);
        package.add_part("word/styles.xml", content_types::WORD_STYLES, styles::styles_xml()?);
        package.add_part(
            "word/settings.xml",
            content_types::WORD_SETTINGS,
            styles::settings_xml()?,
        );
        props::add_properties(&mut package, &document.title, &document.topic)?;

        package.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docforge_core::Section;
    use docforge_ooxml::PackageReader;
    use std::io::Cursor;

    fn sample() -> Document {
        Document::new(4, "Field Guide", "Birds of the coast", DocumentKind::Flow)
            .with_section(
                Section::new(1, "Gulls", 0)
                    .with_content("Gulls are loud.\nThey eat anything.\n\nThey nest on cliffs."),
            )
            .with_section(Section::new(2, "Unwritten", 1))
            .with_section(Section::new(3, "Terns", 2).with_content("Terns dive for fish."))
    }

    fn body_paragraphs(bytes: Vec<u8>) -> Vec<String> {
        let mut reader = PackageReader::new(Cursor::new(bytes)).unwrap();
        reader
            .paragraphs(MAIN_PART)
            .unwrap()
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect()
    }

    #[test]
    fn test_render_lead_page_and_sections() {
        let bytes = FlowDocumentRenderer::new().render(&sample()).unwrap();

        assert_eq!(
            body_paragraphs(bytes),
            vec![
                "Field Guide",
                "Birds of the coast",
                "Table of Contents",
                "1. Gulls\t2",
                "2. Terns\t3",
                "1. Gulls",
                "Gulls are loud. They eat anything.",
                "They nest on cliffs.",
                "2. Terns",
                "Terns dive for fish.",
            ]
        );
    }

    #[test]
    fn test_render_package_parts() {
        let bytes = FlowDocumentRenderer::new().render(&sample()).unwrap();
        let mut reader = PackageReader::new(Cursor::new(bytes)).unwrap();

        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
            "word/settings.xml",
            "docProps/core.xml",
            "docProps/app.xml",
        ] {
            assert!(reader.has_part(part), "missing {}", part);
        }
        let core = reader.read_part("docProps/core.xml").unwrap();
        assert!(core.contains("<dc:title>Field Guide</dc:title>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = FlowDocumentRenderer::new();
        assert_eq!(renderer.render(&sample()).unwrap(), renderer.render(&sample()).unwrap());
    }

    #[test]
    fn test_render_escapes_markup_characters() {
        let doc = Document::new(1, "Q&A <draft>", "Tips & tricks", DocumentKind::Flow)
            .with_section(Section::new(1, "Less < more", 0).with_content("Use a & b."));
        let paragraphs = body_paragraphs(FlowDocumentRenderer::new().render(&doc).unwrap());

        assert_eq!(paragraphs[0], "Q&A <draft>");
        assert!(paragraphs.contains(&"1. Less < more".to_string()));
        assert!(paragraphs.contains(&"Use a & b.".to_string()));
    }

    #[test]
    fn test_render_drops_control_characters() {
        let doc = Document::new(2, "Log\u{1B}[1m Notes", "Vertical\u{0B}tab", DocumentKind::Flow)
            .with_section(Section::new(1, "Output", 0).with_content("Bad\u{0B}char \u{1B}[0m here"));
        let paragraphs = body_paragraphs(FlowDocumentRenderer::new().render(&doc).unwrap());

        assert_eq!(paragraphs[0], "Log[1m Notes");
        assert_eq!(paragraphs[1], "Verticaltab");
        // Vertical tab is whitespace, so it splits words before reaching the XML.
        assert!(paragraphs.contains(&"Bad char [0m here".to_string()));
    }
}
