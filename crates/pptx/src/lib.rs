//! Slide deck (PPTX) renderer.
//!
//! A deck is a title slide, one bulleted slide per section with content and
//! a closing slide, written as a PresentationML package with a single blank
//! layout and theme.

pub mod layout;
pub mod master;
pub mod slide;

pub use layout::{DeckLayout, Slide, SlideKind};

use docforge_core::{Document, DocumentKind, Result};
use docforge_ooxml::package::content_types;
use docforge_ooxml::rels::rel_types;
use docforge_ooxml::{props, Package, Relationships};

const MAIN_PART: &str = "ppt/presentation.xml";

/// Renders documents into PresentationML packages.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlideDeckRenderer;

impl SlideDeckRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self
    }

    /// Render `document` into `.pptx` bytes.
    pub fn render(&self, document: &Document) -> Result<Vec<u8>> {
        if document.kind() != DocumentKind::Deck {
            log::warn!(
                "Rendering {} document {} as a slide deck",
                document.kind(),
                document.id
            );
        }

        let layout = DeckLayout::from_document(document);
        log::debug!(
            "Laid out '{}' as {} slides ({} with content)",
            document.title,
            layout.slides.len(),
            layout.content_count()
        );

        let mut package = Package::new();
        package.add_rels("_rels/.rels", Relationships::package_root(MAIN_PART).to_xml()?);

        let mut presentation_rels = Relationships::new();
        let master_rel = presentation_rels.add(
            rel_types::SLIDE_MASTER,
            "slideMasters/slideMaster1.xml",
        );

        let mut slide_rels = Vec::with_capacity(layout.slides.len());
        for (idx, slide) in layout.slides.iter().enumerate() {
            let number = idx + 1;
            slide_rels.push(
                presentation_rels.add(rel_types::SLIDE, format!("slides/slide{}.xml", number)),
            );
            package.add_part(
                &format!("ppt/slides/slide{}.xml", number),
                content_types::SLIDE,
                slide::slide_xml(slide)?,
            );
            package.add_rels(
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                slide::slide_rels_xml()?,
            );
        }
        presentation_rels.add(rel_types::THEME, "theme/theme1.xml");

        package.add_part(
            MAIN_PART,
            content_types::PRESENTATION,
            master::presentation_xml(&master_rel, &slide_rels)?,
        );
        package.add_rels("ppt/_rels/presentation.xml.rels", presentation_rels.to_xml()?);
        package.add_part(
            "ppt/slideMasters/slideMaster1.xml",
            content_types::SLIDE_MASTER,
            master::slide_master_xml()?,
        );
        package.add_rels(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            master::slide_master_rels_xml()?,
        );
        package.add_part(
            "ppt/slideLayouts/slideLayout1.xml",
            content_types::SLIDE_LAYOUT,
            master::slide_layout_xml()?,
        );
        package.add_rels(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            master::slide_layout_rels_xml()?,
        );
        package.add_part("ppt/theme/theme1.xml", content_types::THEME, master::theme_xml()?);
        props::add_properties(&mut package, &document.title, &document.topic)?;

        package.finish()
    }
}
