//! Slide sequence of a deck, independent of the XML it is written as.

use docforge_core::Document;

/// Text of the slide appended after the last content slide.
pub const CLOSING_TEXT: &str = "Thank You";

/// Role of a slide; each role has its own background and placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideKind {
    Title,
    Content,
    Closing,
}

/// One slide's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub kind: SlideKind,
    pub heading: String,
    /// Subtitle line for the title slide, bullets for content slides.
    pub body: Vec<String>,
}

/// Ordered slides of a deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckLayout {
    pub slides: Vec<Slide>,
}

impl DeckLayout {
    /// Title slide, one slide per section with content, closing slide.
    pub fn from_document(document: &Document) -> Self {
        let mut slides = vec![Slide {
            kind: SlideKind::Title,
            heading: document.title.clone(),
            body: vec![document.topic.clone()],
        }];

        slides.extend(document.content_sections().into_iter().filter_map(|section| {
            section.text().map(|text| Slide {
                kind: SlideKind::Content,
                heading: section.title.clone(),
                body: bullet_lines(text),
            })
        }));

        slides.push(Slide {
            kind: SlideKind::Closing,
            heading: CLOSING_TEXT.to_string(),
            body: Vec::new(),
        });

        Self { slides }
    }

    /// Number of content slides.
    pub fn content_count(&self) -> usize {
        self.slides
            .iter()
            .filter(|s| s.kind == SlideKind::Content)
            .count()
    }
}

/// Each non-blank line becomes one bullet.
pub fn bullet_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docforge_core::{DocumentKind, Section};

    #[test]
    fn test_bullet_lines() {
        assert_eq!(
            bullet_lines("First\n\n  Second  \r\n\t\nThird"),
            vec!["First", "Second", "Third"]
        );
    }

    #[test]
    fn test_slide_sequence() {
        let doc = Document::new(1, "Launch", "Q4 plan", DocumentKind::Deck)
            .with_section(Section::new(1, "Goals", 0).with_content("Ship\nGrow"))
            .with_section(Section::new(2, "Budget", 1))
            .with_section(Section::new(3, "Team", 2).with_content("Hire two"));

        let layout = DeckLayout::from_document(&doc);

        let kinds: Vec<SlideKind> = layout.slides.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SlideKind::Title, SlideKind::Content, SlideKind::Content, SlideKind::Closing]
        );
        assert_eq!(layout.slides[0].body, vec!["Q4 plan"]);
        assert_eq!(layout.slides[1].body, vec!["Ship", "Grow"]);
        assert_eq!(layout.slides[2].heading, "Team");
        assert_eq!(layout.slides[3].heading, CLOSING_TEXT);
        assert_eq!(layout.content_count(), 2);
    }
}
