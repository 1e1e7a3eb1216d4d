//! WordprocessingML for `word/document.xml`.

use crate::layout::{FlowLayout, FlowSection, TocEntry};
use docforge_core::Result;
use docforge_ooxml::XmlWriter;

const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Heading of the table of contents block.
pub const TOC_HEADING: &str = "Table of Contents";

/// Body paragraph first-line indent, in twentieths of a point (0.5in).
const FIRST_LINE_INDENT: &str = "720";

/// Right tab stop for TOC page numbers: page width minus both margins.
const TOC_TAB_POSITION: &str = "9360";

/// Letter size and one-inch margins, in twentieths of a point.
const PAGE_WIDTH: &str = "12240";
const PAGE_HEIGHT: &str = "15840";
const PAGE_MARGIN: &str = "1440";

/// Serialize the document body.
pub fn document_xml(layout: &FlowLayout) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "w:document",
        &[("xmlns:w", WORDPROCESSING_NS), ("xmlns:r", RELATIONSHIPS_NS)],
    )?;
    xml.start("w:body", &[])?;

    write_lead_page(&mut xml, layout)?;

    let last = layout.sections.len().saturating_sub(1);
    for (idx, section) in layout.sections.iter().enumerate() {
        write_section(&mut xml, section)?;
        if idx < last {
            page_break(&mut xml)?;
        }
    }

    write_section_properties(&mut xml)?;
    xml.end("w:body")?;
    xml.end("w:document")?;
    Ok(xml.into_bytes())
}

fn write_lead_page(xml: &mut XmlWriter, layout: &FlowLayout) -> Result<()> {
    styled_paragraph(xml, "Title", Some("center"), &layout.title)?;
    styled_paragraph(xml, "Subtitle", Some("center"), &layout.subtitle)?;

    styled_paragraph(xml, "TOCHeading", None, TOC_HEADING)?;
    for entry in &layout.toc {
        toc_entry(xml, entry)?;
    }

    page_break(xml)
}

fn write_section(xml: &mut XmlWriter, section: &FlowSection) -> Result<()> {
    styled_paragraph(xml, "Heading1", None, &section.heading)?;

    for paragraph in &section.paragraphs {
        xml.start("w:p", &[])?;
        xml.start("w:pPr", &[])?;
        xml.empty("w:pStyle", &[("w:val", "BodyText")])?;
        xml.empty("w:ind", &[("w:firstLine", FIRST_LINE_INDENT)])?;
        xml.empty("w:jc", &[("w:val", "both")])?;
        xml.end("w:pPr")?;
        run(xml, paragraph)?;
        xml.end("w:p")?;
    }
    Ok(())
}

/// `N. Title` and the estimated page, separated by a dotted right tab.
fn toc_entry(xml: &mut XmlWriter, entry: &TocEntry) -> Result<()> {
    xml.start("w:p", &[])?;
    xml.start("w:pPr", &[])?;
    xml.empty("w:pStyle", &[("w:val", "TOC1")])?;
    xml.start("w:tabs", &[])?;
    xml.empty(
        "w:tab",
        &[("w:val", "right"), ("w:leader", "dot"), ("w:pos", TOC_TAB_POSITION)],
    )?;
    xml.end("w:tabs")?;
    xml.end("w:pPr")?;

    run(xml, &entry.label())?;
    xml.start("w:r", &[])?;
    xml.empty("w:tab", &[])?;
    xml.text_element("w:t", &[], &entry.page.to_string())?;
    xml.end("w:r")?;

    xml.end("w:p")
}

fn styled_paragraph(xml: &mut XmlWriter, style: &str, align: Option<&str>, text: &str) -> Result<()> {
    xml.start("w:p", &[])?;
    xml.start("w:pPr", &[])?;
    xml.empty("w:pStyle", &[("w:val", style)])?;
    if let Some(align) = align {
        xml.empty("w:jc", &[("w:val", align)])?;
    }
    xml.end("w:pPr")?;
    if !text.is_empty() {
        run(xml, text)?;
    }
    xml.end("w:p")
}

fn run(xml: &mut XmlWriter, text: &str) -> Result<()> {
    xml.start("w:r", &[])?;
    if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
        xml.text_element("w:t", &[("xml:space", "preserve")], text)?;
    } else {
        xml.text_element("w:t", &[], text)?;
    }
    xml.end("w:r")
}

fn page_break(xml: &mut XmlWriter) -> Result<()> {
    xml.start("w:p", &[])?;
    xml.start("w:r", &[])?;
    xml.empty("w:br", &[("w:type", "page")])?;
    xml.end("w:r")?;
    xml.end("w:p")
}

fn write_section_properties(xml: &mut XmlWriter) -> Result<()> {
    xml.start("w:sectPr", &[])?;
    xml.empty("w:pgSz", &[("w:w", PAGE_WIDTH), ("w:h", PAGE_HEIGHT)])?;
    xml.empty(
        "w:pgMar",
        &[
            ("w:top", PAGE_MARGIN),
            ("w:right", PAGE_MARGIN),
            ("w:bottom", PAGE_MARGIN),
            ("w:left", PAGE_MARGIN),
            ("w:header", "720"),
            ("w:footer", "720"),
            ("w:gutter", "0"),
        ],
    )?;
    xml.end("w:sectPr")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(sections: usize) -> FlowLayout {
        FlowLayout {
            title: "Guide".into(),
            subtitle: "How things work".into(),
            toc: (1..=sections)
                .map(|n| TocEntry { number: n, title: format!("Part {}", n), page: n + 1 })
                .collect(),
            sections: (1..=sections)
                .map(|n| FlowSection {
                    heading: format!("{}. Part {}", n, n),
                    paragraphs: vec!["Body.".into()],
                })
                .collect(),
        }
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_page_breaks_between_sections_only() {
        let xml = String::from_utf8(document_xml(&layout(3)).unwrap()).unwrap();
        // One after the lead page plus two between three sections.
        assert_eq!(count(&xml, "<w:br w:type=\"page\"/>"), 3);
        assert!(xml.trim_end().ends_with("</w:sectPr></w:body></w:document>"));
    }

    #[test]
    fn test_body_paragraphs_justified_and_indented() {
        let xml = String::from_utf8(document_xml(&layout(1)).unwrap()).unwrap();
        assert!(xml.contains("<w:ind w:firstLine=\"720\"/><w:jc w:val=\"both\"/>"));
        assert!(xml.contains("<w:pStyle w:val=\"Heading1\"/>"));
    }

    #[test]
    fn test_paragraph_properties_in_schema_order() {
        // pStyle, tabs, spacing, ind, jc is the order CT_PPr requires.
        let xml = String::from_utf8(document_xml(&layout(2)).unwrap()).unwrap();
        for properties in xml.split("<w:pPr>").skip(1) {
            let properties = properties.split("</w:pPr>").next().unwrap();
            if let (Some(ind), Some(jc)) = (properties.find("<w:ind "), properties.find("<w:jc ")) {
                assert!(ind < jc, "w:ind after w:jc in {}", properties);
            }
        }
        assert_eq!(count(&xml, "<w:ind w:firstLine=\"720\"/><w:jc w:val=\"both\"/>"), 2);
    }

    #[test]
    fn test_toc_entry_has_dot_leader_tab() {
        let xml = String::from_utf8(document_xml(&layout(1)).unwrap()).unwrap();
        assert!(xml.contains("w:leader=\"dot\""));
        assert!(xml.contains("<w:t>1. Part 1</w:t>"));
        assert!(xml.contains("<w:tab/><w:t>2</w:t>"));
    }

    #[test]
    fn test_whitespace_preserved() {
        let mut xml = XmlWriter::new().unwrap();
        run(&mut xml, " padded").unwrap();
        let xml = String::from_utf8(xml.into_bytes()).unwrap();
        assert!(xml.contains("<w:t xml:space=\"preserve\"> padded</w:t>"));
    }
}
