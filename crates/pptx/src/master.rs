//! Presentation-level parts: `presentation.xml`, the slide master, its one
//! blank layout and the theme.

use crate::slide::{
    write_group_properties, DRAWING_NS, PRESENTATION_NS, RELATIONSHIPS_NS, SLIDE_HEIGHT,
    SLIDE_WIDTH,
};
use docforge_core::Result;
use docforge_ooxml::rels::rel_types;
use docforge_ooxml::{Relationships, XmlWriter};

/// First id of the slide master list; layout ids continue after it.
const MASTER_ID: u32 = 2_147_483_648;
/// First slide id allowed in `sldIdLst`.
const FIRST_SLIDE_ID: u32 = 256;

const MAJOR_FONT: &str = "Calibri Light";
const MINOR_FONT: &str = "Calibri";

/// Theme colour slots in schema order, with their RGB values.
const COLOR_SCHEME: &[(&str, &str)] = &[
    ("dk1", "000000"),
    ("lt1", "FFFFFF"),
    ("dk2", "1F3864"),
    ("lt2", "E7E6E6"),
    ("accent1", "4472C4"),
    ("accent2", "C55A11"),
    ("accent3", "A5A5A5"),
    ("accent4", "FFC000"),
    ("accent5", "5B9BD5"),
    ("accent6", "70AD47"),
    ("hlink", "0563C1"),
    ("folHlink", "954F72"),
];

/// Serialize `ppt/presentation.xml`. `slide_rel_ids` are the relationship
/// ids of the slides in display order.
pub fn presentation_xml(master_rel_id: &str, slide_rel_ids: &[String]) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "p:presentation",
        &[
            ("xmlns:a", DRAWING_NS),
            ("xmlns:r", RELATIONSHIPS_NS),
            ("xmlns:p", PRESENTATION_NS),
            ("saveSubsetFonts", "1"),
        ],
    )?;

    xml.start("p:sldMasterIdLst", &[])?;
    xml.empty(
        "p:sldMasterId",
        &[("id", MASTER_ID.to_string().as_str()), ("r:id", master_rel_id)],
    )?;
    xml.end("p:sldMasterIdLst")?;

    xml.start("p:sldIdLst", &[])?;
    for (idx, rel_id) in slide_rel_ids.iter().enumerate() {
        let id = (FIRST_SLIDE_ID + idx as u32).to_string();
        xml.empty("p:sldId", &[("id", id.as_str()), ("r:id", rel_id.as_str())])?;
    }
    xml.end("p:sldIdLst")?;

    xml.empty(
        "p:sldSz",
        &[
            ("cx", SLIDE_WIDTH.to_string().as_str()),
            ("cy", SLIDE_HEIGHT.to_string().as_str()),
            ("type", "screen4x3"),
        ],
    )?;
    xml.empty("p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])?;
    xml.end("p:presentation")?;
    Ok(xml.into_bytes())
}

/// Serialize the slide master. Its only layout is `rId1` in its rels.
pub fn slide_master_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "p:sldMaster",
        &[
            ("xmlns:a", DRAWING_NS),
            ("xmlns:r", RELATIONSHIPS_NS),
            ("xmlns:p", PRESENTATION_NS),
        ],
    )?;
    xml.start("p:cSld", &[])?;
    xml.start("p:bg", &[])?;
    xml.start("p:bgRef", &[("idx", "1001")])?;
    xml.empty("a:schemeClr", &[("val", "bg1")])?;
    xml.end("p:bgRef")?;
    xml.end("p:bg")?;
    xml.start("p:spTree", &[])?;
    write_group_properties(&mut xml)?;
    xml.end("p:spTree")?;
    xml.end("p:cSld")?;

    xml.empty(
        "p:clrMap",
        &[
            ("bg1", "lt1"),
            ("tx1", "dk1"),
            ("bg2", "lt2"),
            ("tx2", "dk2"),
            ("accent1", "accent1"),
            ("accent2", "accent2"),
            ("accent3", "accent3"),
            ("accent4", "accent4"),
            ("accent5", "accent5"),
            ("accent6", "accent6"),
            ("hlink", "hlink"),
            ("folHlink", "folHlink"),
        ],
    )?;

    xml.start("p:sldLayoutIdLst", &[])?;
    xml.empty(
        "p:sldLayoutId",
        &[("id", (MASTER_ID + 1).to_string().as_str()), ("r:id", "rId1")],
    )?;
    xml.end("p:sldLayoutIdLst")?;
    xml.end("p:sldMaster")?;
    Ok(xml.into_bytes())
}

pub fn slide_master_rels_xml() -> Result<Vec<u8>> {
    let mut rels = Relationships::new();
    rels.add(rel_types::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
    rels.add(rel_types::THEME, "../theme/theme1.xml");
    rels.to_xml()
}

/// Serialize the blank layout every slide uses.
pub fn slide_layout_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "p:sldLayout",
        &[
            ("xmlns:a", DRAWING_NS),
            ("xmlns:r", RELATIONSHIPS_NS),
            ("xmlns:p", PRESENTATION_NS),
            ("type", "blank"),
            ("preserve", "1"),
        ],
    )?;
    xml.start("p:cSld", &[("name", "Blank")])?;
    xml.start("p:spTree", &[])?;
    write_group_properties(&mut xml)?;
    xml.end("p:spTree")?;
    xml.end("p:cSld")?;
    xml.start("p:clrMapOvr", &[])?;
    xml.empty("a:masterClrMapping", &[])?;
    xml.end("p:clrMapOvr")?;
    xml.end("p:sldLayout")?;
    Ok(xml.into_bytes())
}

pub fn slide_layout_rels_xml() -> Result<Vec<u8>> {
    let mut rels = Relationships::new();
    rels.add(rel_types::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
    rels.to_xml()
}

/// Serialize the theme: colour, font and format schemes.
pub fn theme_xml() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("a:theme", &[("xmlns:a", DRAWING_NS), ("name", "Docforge")])?;
    xml.start("a:themeElements", &[])?;

    xml.start("a:clrScheme", &[("name", "Docforge")])?;
    for (slot, rgb) in COLOR_SCHEME {
        xml.start(&format!("a:{}", slot), &[])?;
        xml.empty("a:srgbClr", &[("val", *rgb)])?;
        xml.end(&format!("a:{}", slot))?;
    }
    xml.end("a:clrScheme")?;

    xml.start("a:fontScheme", &[("name", "Docforge")])?;
    for (element, typeface) in [("a:majorFont", MAJOR_FONT), ("a:minorFont", MINOR_FONT)] {
        xml.start(element, &[])?;
        xml.empty("a:latin", &[("typeface", typeface)])?;
        xml.empty("a:ea", &[("typeface", "")])?;
        xml.empty("a:cs", &[("typeface", "")])?;
        xml.end(element)?;
    }
    xml.end("a:fontScheme")?;

    write_format_scheme(&mut xml)?;

    xml.end("a:themeElements")?;
    xml.end("a:theme")?;
    Ok(xml.into_bytes())
}

/// Each style list must hold at least three entries.
fn write_format_scheme(xml: &mut XmlWriter) -> Result<()> {
    xml.start("a:fmtScheme", &[("name", "Docforge")])?;

    xml.start("a:fillStyleLst", &[])?;
    for _ in 0..3 {
        phantom_fill(xml)?;
    }
    xml.end("a:fillStyleLst")?;

    xml.start("a:lnStyleLst", &[])?;
    for width in ["6350", "12700", "19050"] {
        xml.start("a:ln", &[("w", width)])?;
        phantom_fill(xml)?;
        xml.end("a:ln")?;
    }
    xml.end("a:lnStyleLst")?;

    xml.start("a:effectStyleLst", &[])?;
    for _ in 0..3 {
        xml.start("a:effectStyle", &[])?;
        xml.empty("a:effectLst", &[])?;
        xml.end("a:effectStyle")?;
    }
    xml.end("a:effectStyleLst")?;

    xml.start("a:bgFillStyleLst", &[])?;
    for _ in 0..3 {
        phantom_fill(xml)?;
    }
    xml.end("a:bgFillStyleLst")?;

    xml.end("a:fmtScheme")
}

/// A solid fill of whatever colour the referencing element supplies.
fn phantom_fill(xml: &mut XmlWriter) -> Result<()> {
    xml.start("a:solidFill", &[])?;
    xml.empty("a:schemeClr", &[("val", "phClr")])?;
    xml.end("a:solidFill")
}
