//! PresentationML for individual slides.

use crate::layout::{Slide, SlideKind};
use docforge_core::Result;
use docforge_ooxml::XmlWriter;

pub(crate) const DRAWING_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub(crate) const PRESENTATION_NS: &str =
    "http://schemas.openxmlformats.org/presentationml/2006/main";

/// 10in x 7.5in, in EMU.
pub const SLIDE_WIDTH: i64 = 9_144_000;
pub const SLIDE_HEIGHT: i64 = 6_858_000;

const TITLE_BACKGROUND: &str = "1F3864";
const CONTENT_BACKGROUND: &str = "FFFFFF";
const CLOSING_BACKGROUND: &str = "C55A11";
const LIGHT_TEXT: &str = "FFFFFF";
const SUBTITLE_TEXT: &str = "D9E2F3";
const HEADING_TEXT: &str = "1F3864";
const BODY_TEXT: &str = "262626";

/// Bullet hanging indent, in EMU.
const BULLET_INDENT: &str = "342900";

/// Placement of a text box, in EMU.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: i64,
    y: i64,
    cx: i64,
    cy: i64,
}

/// Character formatting of a run. `size` is in hundredths of a point.
#[derive(Debug, Clone, Copy)]
struct Font {
    size: u32,
    bold: bool,
    color: &'static str,
}

struct TextBox<'a> {
    name: &'a str,
    frame: Frame,
    anchor: &'static str,
    align: &'static str,
    font: Font,
    bullets: bool,
    lines: &'a [String],
}

/// Background colour of a slide role.
pub fn background(kind: SlideKind) -> &'static str {
    match kind {
        SlideKind::Title => TITLE_BACKGROUND,
        SlideKind::Content => CONTENT_BACKGROUND,
        SlideKind::Closing => CLOSING_BACKGROUND,
    }
}

/// Serialize one slide.
pub fn slide_xml(slide: &Slide) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "p:sld",
        &[
            ("xmlns:a", DRAWING_NS),
            ("xmlns:r", RELATIONSHIPS_NS),
            ("xmlns:p", PRESENTATION_NS),
        ],
    )?;
    xml.start("p:cSld", &[])?;
    write_background(&mut xml, background(slide.kind))?;
    xml.start("p:spTree", &[])?;
    write_group_properties(&mut xml)?;

    let heading = std::slice::from_ref(&slide.heading);
    for (idx, text_box) in text_boxes(slide, heading).iter().enumerate() {
        write_text_box(&mut xml, idx as u32 + 2, text_box)?;
    }

    xml.end("p:spTree")?;
    xml.end("p:cSld")?;
    xml.start("p:clrMapOvr", &[])?;
    xml.empty("a:masterClrMapping", &[])?;
    xml.end("p:clrMapOvr")?;
    xml.end("p:sld")?;
    Ok(xml.into_bytes())
}

fn text_boxes<'a>(slide: &'a Slide, heading: &'a [String]) -> Vec<TextBox<'a>> {
    match slide.kind {
        SlideKind::Title => vec![
            TextBox {
                name: "Title",
                frame: Frame { x: 685_800, y: 2_130_425, cx: 7_772_400, cy: 1_470_025 },
                anchor: "b",
                align: "ctr",
                font: Font { size: 4400, bold: true, color: LIGHT_TEXT },
                bullets: false,
                lines: heading,
            },
            TextBox {
                name: "Subtitle",
                frame: Frame { x: 1_371_600, y: 3_886_200, cx: 6_400_800, cy: 1_752_600 },
                anchor: "t",
                align: "ctr",
                font: Font { size: 2400, bold: false, color: SUBTITLE_TEXT },
                bullets: false,
                lines: &slide.body,
            },
        ],
        SlideKind::Content => vec![
            TextBox {
                name: "Heading",
                frame: Frame { x: 457_200, y: 274_638, cx: 8_229_600, cy: 1_143_000 },
                anchor: "ctr",
                align: "l",
                font: Font { size: 3200, bold: true, color: HEADING_TEXT },
                bullets: false,
                lines: heading,
            },
            TextBox {
                name: "Content",
                frame: Frame { x: 457_200, y: 1_600_200, cx: 8_229_600, cy: 4_525_963 },
                anchor: "t",
                align: "l",
                font: Font { size: 1800, bold: false, color: BODY_TEXT },
                bullets: true,
                lines: &slide.body,
            },
        ],
        SlideKind::Closing => vec![TextBox {
            name: "Closing",
            frame: Frame { x: 457_200, y: 2_743_200, cx: 8_229_600, cy: 1_371_600 },
            anchor: "ctr",
            align: "ctr",
            font: Font { size: 4800, bold: true, color: LIGHT_TEXT },
            bullets: false,
            lines: heading,
        }],
    }
}

fn write_background(xml: &mut XmlWriter, color: &str) -> Result<()> {
    xml.start("p:bg", &[])?;
    xml.start("p:bgPr", &[])?;
    solid_fill(xml, color)?;
    xml.empty("a:effectLst", &[])?;
    xml.end("p:bgPr")?;
    xml.end("p:bg")
}

/// Non-visual and transform properties of the slide's root shape group.
pub(crate) fn write_group_properties(xml: &mut XmlWriter) -> Result<()> {
    xml.start("p:nvGrpSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    xml.empty("p:cNvGrpSpPr", &[])?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvGrpSpPr")?;

    xml.start("p:grpSpPr", &[])?;
    xml.start("a:xfrm", &[])?;
    xml.empty("a:off", &[("x", "0"), ("y", "0")])?;
    xml.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
    xml.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
    xml.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
    xml.end("a:xfrm")?;
    xml.end("p:grpSpPr")
}

fn write_text_box(xml: &mut XmlWriter, id: u32, text_box: &TextBox<'_>) -> Result<()> {
    let id = id.to_string();
    let frame = text_box.frame;

    xml.start("p:sp", &[])?;
    xml.start("p:nvSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", id.as_str()), ("name", text_box.name)])?;
    xml.empty("p:cNvSpPr", &[("txBox", "1")])?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvSpPr")?;

    xml.start("p:spPr", &[])?;
    xml.start("a:xfrm", &[])?;
    xml.empty(
        "a:off",
        &[("x", frame.x.to_string().as_str()), ("y", frame.y.to_string().as_str())],
    )?;
    xml.empty(
        "a:ext",
        &[("cx", frame.cx.to_string().as_str()), ("cy", frame.cy.to_string().as_str())],
    )?;
    xml.end("a:xfrm")?;
    xml.start("a:prstGeom", &[("prst", "rect")])?;
    xml.empty("a:avLst", &[])?;
    xml.end("a:prstGeom")?;
    xml.empty("a:noFill", &[])?;
    xml.end("p:spPr")?;

    xml.start("p:txBody", &[])?;
    xml.start("a:bodyPr", &[("wrap", "square"), ("anchor", text_box.anchor)])?;
    xml.empty("a:normAutofit", &[])?;
    xml.end("a:bodyPr")?;
    xml.empty("a:lstStyle", &[])?;
    if text_box.lines.is_empty() {
        xml.empty("a:p", &[])?;
    }
    for line in text_box.lines {
        write_paragraph(xml, text_box, line)?;
    }
    xml.end("p:txBody")?;
    xml.end("p:sp")
}

fn write_paragraph(xml: &mut XmlWriter, text_box: &TextBox<'_>, text: &str) -> Result<()> {
    xml.start("a:p", &[])?;
    if text_box.bullets {
        xml.start(
            "a:pPr",
            &[
                ("marL", BULLET_INDENT),
                ("lvl", "0"),
                ("indent", format!("-{}", BULLET_INDENT).as_str()),
                ("algn", text_box.align),
            ],
        )?;
        xml.empty("a:buFont", &[("typeface", "Arial")])?;
        xml.empty("a:buChar", &[("char", "•")])?;
        xml.end("a:pPr")?;
    } else {
        xml.empty("a:pPr", &[("algn", text_box.align)])?;
    }

    let size = text_box.font.size.to_string();
    let mut attrs = vec![("lang", "en-US"), ("sz", size.as_str())];
    if text_box.font.bold {
        attrs.push(("b", "1"));
    }
    attrs.push(("dirty", "0"));

    xml.start("a:r", &[])?;
    xml.start("a:rPr", &attrs)?;
    solid_fill(xml, text_box.font.color)?;
    xml.end("a:rPr")?;
    xml.text_element("a:t", &[], text)?;
    xml.end("a:r")?;
    xml.end("a:p")
}

pub(crate) fn solid_fill(xml: &mut XmlWriter, color: &str) -> Result<()> {
    xml.start("a:solidFill", &[])?;
    xml.empty("a:srgbClr", &[("val", color)])?;
    xml.end("a:solidFill")
}

/// Relationship part of a slide: its layout.
pub fn slide_rels_xml() -> Result<Vec<u8>> {
    let mut rels = docforge_ooxml::Relationships::new();
    rels.add(
        docforge_ooxml::rels::rel_types::SLIDE_LAYOUT,
        "../slideLayouts/slideLayout1.xml",
    );
    rels.to_xml()
}
