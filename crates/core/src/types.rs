//! Domain types for documents, their sections, and rendered output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Media type of a rendered flow document (`.docx`).
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Media type of a rendered slide deck (`.pptx`).
pub const PPTX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// The kind of container a document is generated for and rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Paginated prose document.
    #[serde(rename = "docx", alias = "flow")]
    Flow,
    /// Slide deck.
    #[serde(rename = "pptx", alias = "deck")]
    Deck,
}

impl DocumentKind {
    /// Parse a kind from its wire name (`docx`/`pptx`) or its role name
    /// (`flow`/`deck`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "docx" | "flow" => Some(Self::Flow),
            "pptx" | "deck" => Some(Self::Deck),
            _ => None,
        }
    }

    /// File extension (without the dot) of the rendered container.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Flow => "docx",
            Self::Deck => "pptx",
        }
    }

    /// Media type of the rendered container.
    pub fn media_type(self) -> &'static str {
        match self {
            Self::Flow => DOCX_MEDIA_TYPE,
            Self::Deck => PPTX_MEDIA_TYPE,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A document: a topic plus an ordered list of sections.
///
/// The kind is fixed at construction; already generated content is shaped
/// for it (paragraphs for flow documents, bullet lines for decks).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub title: String,
    /// Free text used as the generation seed.
    pub topic: String,
    kind: DocumentKind,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Document {
    /// Create an empty document.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        topic: impl Into<String>,
        kind: DocumentKind,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            topic: topic.into(),
            kind,
            sections: Vec::new(),
        }
    }

    /// The document kind.
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Builder-style section addition.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Add a section.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Indices into `sections`, sorted by ascending `order`.
    pub fn order_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.sections.len()).collect();
        indices.sort_by_key(|&i| self.sections[i].order);
        indices
    }

    /// Sections sorted by ascending `order`.
    pub fn sections_in_order(&self) -> Vec<&Section> {
        self.order_indices()
            .into_iter()
            .map(|i| &self.sections[i])
            .collect()
    }

    /// Sections with non-empty content, in order.
    pub fn content_sections(&self) -> Vec<&Section> {
        self.sections_in_order()
            .into_iter()
            .filter(|s| s.has_content())
            .collect()
    }

    /// Whether at least one section has content.
    pub fn has_content(&self) -> bool {
        self.sections.iter().any(Section::has_content)
    }

    /// Look up a section by id.
    pub fn section(&self, id: u64) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Look up a section by id, mutably.
    pub fn section_mut(&mut self, id: u64) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }
}

/// One section of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: u64,
    pub title: String,
    /// Position within the document; unique per document.
    pub order: u32,
    /// Sanitized text, `None` until generated.
    #[serde(default)]
    pub content: Option<String>,
}

impl Section {
    /// Create a section without content.
    pub fn new(id: u64, title: impl Into<String>, order: u32) -> Self {
        Self {
            id,
            title: title.into(),
            order,
            content: None,
        }
    }

    /// Builder-style content assignment.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Content if present and not blank.
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.trim().is_empty())
    }

    /// Whether the section has non-blank content.
    pub fn has_content(&self) -> bool {
        self.text().is_some()
    }
}

/// A synthesized outline entry, before it is persisted as a [`Section`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub title: String,
    /// 0-based position.
    pub order: u32,
}

/// History record of one refinement applied to a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinementRecord {
    pub section_id: u64,
    /// The user's refinement instruction.
    pub prompt: String,
    pub previous_content: String,
    pub new_content: String,
}

/// The byte stream of a rendered document, ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub media_type: &'static str,
    pub filename: String,
}
