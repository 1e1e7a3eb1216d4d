//! `word/styles.xml` and `word/settings.xml`.

use docforge_core::Result;
use docforge_ooxml::XmlWriter;

const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const BODY_FONT: &str = "Calibri";
const HEADING_FONT: &str = "Calibri Light";
const ACCENT_COLOR: &str = "1F3864";
const MUTED_COLOR: &str = "595959";

/// Run and paragraph formatting of one paragraph style.
struct ParagraphStyle {
    id: &'static str,
    name: &'static str,
    font: &'static str,
    /// Half-points.
    size: &'static str,
    bold: bool,
    italic: bool,
    color: Option<&'static str>,
    space_before: &'static str,
    space_after: &'static str,
    keep_next: bool,
    outline_level: Option<&'static str>,
}

const STYLES: &[ParagraphStyle] = &[
    ParagraphStyle {
        id: "Title",
        name: "Title",
        font: HEADING_FONT,
        size: "56",
        bold: true,
        italic: false,
        color: Some(ACCENT_COLOR),
        space_before: "2400",
        space_after: "240",
        keep_next: true,
        outline_level: None,
    },
    ParagraphStyle {
        id: "Subtitle",
        name: "Subtitle",
        font: BODY_FONT,
        size: "24",
        bold: false,
        italic: true,
        color: Some(MUTED_COLOR),
        space_before: "0",
        space_after: "720",
        keep_next: true,
        outline_level: None,
    },
    ParagraphStyle {
        id: "TOCHeading",
        name: "TOC Heading",
        font: HEADING_FONT,
        size: "28",
        bold: true,
        italic: false,
        color: Some(ACCENT_COLOR),
        space_before: "480",
        space_after: "240",
        keep_next: true,
        outline_level: None,
    },
    ParagraphStyle {
        id: "TOC1",
        name: "toc 1",
        font: BODY_FONT,
        size: "22",
        bold: false,
        italic: false,
        color: None,
        space_before: "0",
        space_after: "100",
        keep_next: false,
        outline_level: None,
    },
    ParagraphStyle {
        id: "Heading1",
        name: "heading 1",
        font: HEADING_FONT,
        size: "32",
        bold: true,
        italic: false,
        color: Some(ACCENT_COLOR),
        space_before: "360",
        space_after: "240",
        keep_next: true,
        outline_level: Some("0"),
    },
    ParagraphStyle {
        id: "BodyText",
        name: "Body Text",
        font: BODY_FONT,
        size: "22",
        bold: false,
        italic: false,
        color: None,
        space_before: "0",
        space_after: "160",
        keep_next: false,
        outline_level: None,
    },
];

/// Serialize the style sheet.
pub fn styles_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("w:styles", &[("xmlns:w", WORDPROCESSING_NS)])?;

    xml.start("w:docDefaults", &[])?;
    xml.start("w:rPrDefault", &[])?;
    xml.start("w:rPr", &[])?;
    fonts(&mut xml, BODY_FONT)?;
    xml.empty("w:sz", &[("w:val", "22")])?;
    xml.empty("w:lang", &[("w:val", "en-US")])?;
    xml.end("w:rPr")?;
    xml.end("w:rPrDefault")?;
    xml.start("w:pPrDefault", &[])?;
    xml.start("w:pPr", &[])?;
    xml.empty("w:spacing", &[("w:after", "160"), ("w:line", "276"), ("w:lineRule", "auto")])?;
    xml.end("w:pPr")?;
    xml.end("w:pPrDefault")?;
    xml.end("w:docDefaults")?;

    xml.start(
        "w:style",
        &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
    )?;
    xml.empty("w:name", &[("w:val", "Normal")])?;
    xml.empty("w:qFormat", &[])?;
    xml.end("w:style")?;

    for style in STYLES {
        write_style(&mut xml, style)?;
    }

    xml.end("w:styles")?;
    Ok(xml.into_bytes())
}

fn write_style(xml: &mut XmlWriter, style: &ParagraphStyle) -> Result<()> {
    xml.start("w:style", &[("w:type", "paragraph"), ("w:styleId", style.id)])?;
    xml.empty("w:name", &[("w:val", style.name)])?;
    xml.empty("w:basedOn", &[("w:val", "Normal")])?;
    xml.empty("w:next", &[("w:val", "BodyText")])?;
    xml.empty("w:qFormat", &[])?;

    xml.start("w:pPr", &[])?;
    if style.keep_next {
        xml.empty("w:keepNext", &[])?;
    }
    xml.empty(
        "w:spacing",
        &[("w:before", style.space_before), ("w:after", style.space_after)],
    )?;
    if let Some(level) = style.outline_level {
        xml.empty("w:outlineLvl", &[("w:val", level)])?;
    }
    xml.end("w:pPr")?;

    xml.start("w:rPr", &[])?;
    fonts(xml, style.font)?;
    if style.bold {
        xml.empty("w:b", &[])?;
    }
    if style.italic {
        xml.empty("w:i", &[])?;
    }
    if let Some(color) = style.color {
        xml.empty("w:color", &[("w:val", color)])?;
    }
    xml.empty("w:sz", &[("w:val", style.size)])?;
    xml.end("w:rPr")?;

    xml.end("w:style")
}

fn fonts(xml: &mut XmlWriter, font: &str) -> Result<()> {
    xml.empty(
        "w:rFonts",
        &[("w:ascii", font), ("w:hAnsi", font), ("w:cs", font)],
    )
}

/// Serialize document settings.
pub fn settings_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("w:settings", &[("xmlns:w", WORDPROCESSING_NS)])?;
    xml.empty("w:defaultTabStop", &[("w:val", "720")])?;
    xml.empty("w:characterSpacingControl", &[("w:val", "doNotCompress")])?;
    xml.end("w:settings")?;
    Ok(xml.into_bytes())
}
