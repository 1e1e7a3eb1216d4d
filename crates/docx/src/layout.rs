//! Layout of a flow document, independent of the XML it is written as.

use docforge_core::Document;
use regex::Regex;
use std::sync::LazyLock;

/// Words assumed to fit on one page when estimating the table of contents.
pub const WORDS_PER_PAGE: usize = 500;

/// Page on which content starts; page 1 is the lead page.
pub const FIRST_CONTENT_PAGE: usize = 2;

/// A blank line, possibly containing whitespace.
static PARAGRAPH_BREAK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n").unwrap());

/// The laid-out content of a flow document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowLayout {
    pub title: String,
    pub subtitle: String,
    pub toc: Vec<TocEntry>,
    pub sections: Vec<FlowSection>,
}

/// One line of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// 1-based position among sections with content.
    pub number: usize,
    pub title: String,
    /// Estimated first page.
    pub page: usize,
}

impl TocEntry {
    /// Text shown before the page number.
    pub fn label(&self) -> String {
        format!("{}. {}", self.number, self.title)
    }
}

/// A section's heading and body paragraphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSection {
    pub heading: String,
    pub paragraphs: Vec<String>,
}

impl FlowLayout {
    /// Lay out `document`. Sections without content are skipped and do not
    /// consume a number.
    pub fn from_document(document: &Document) -> Self {
        let mut toc = Vec::new();
        let mut sections = Vec::new();
        let mut page = FIRST_CONTENT_PAGE;

        for (idx, (title, content)) in document
            .content_sections()
            .into_iter()
            .filter_map(|s| s.text().map(|text| (s.title.as_str(), text)))
            .enumerate()
        {
            let number = idx + 1;
            toc.push(TocEntry {
                number,
                title: title.to_string(),
                page,
            });
            page += estimated_pages(content);

            sections.push(FlowSection {
                heading: format!("{}. {}", number, title),
                paragraphs: split_paragraphs(content),
            });
        }

        Self {
            title: document.title.clone(),
            subtitle: document.topic.clone(),
            toc,
            sections,
        }
    }
}

/// Estimated page span of a section: one page per 500 words, at least one.
pub fn estimated_pages(content: &str) -> usize {
    (word_count(content) / WORDS_PER_PAGE).max(1)
}

pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Split on blank lines; single line breaks inside a paragraph become spaces.
pub fn split_paragraphs(content: &str) -> Vec<String> {
    let content = content.replace("\r\n", "\n");
    PARAGRAPH_BREAK_REGEX
        .split(&content)
        .map(|block| block.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|paragraph| !paragraph.is_empty())
        .collect()
}
