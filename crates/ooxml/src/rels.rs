//! Relationship parts (`*.rels`).

use crate::xml::XmlWriter;
use docforge_core::Result;

const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Relationship type URIs.
pub mod rel_types {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
    pub const STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const SETTINGS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";
    pub const SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    pub const SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
    pub const SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
    pub const THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
}

/// A relationship part under construction. Ids are assigned as `rId1`,
/// `rId2`, ... in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    entries: Vec<(String, &'static str, String)>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return its id.
    pub fn add(&mut self, rel_type: &'static str, target: impl Into<String>) -> String {
        let id = format!("rId{}", self.entries.len() + 1);
        self.entries.push((id.clone(), rel_type, target.into()));
        id
    }

    /// Relationships of the package root: main part plus document properties.
    pub fn package_root(main_part: &str) -> Self {
        let mut rels = Self::new();
        rels.add(rel_types::OFFICE_DOCUMENT, main_part);
        rels.add(rel_types::CORE_PROPERTIES, "docProps/core.xml");
        rels.add(rel_types::EXTENDED_PROPERTIES, "docProps/app.xml");
        rels
    }

    /// Serialize the part.
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut xml = XmlWriter::new()?;
        xml.start("Relationships", &[("xmlns", RELATIONSHIPS_NS)])?;
        for (id, rel_type, target) in &self.entries {
            xml.empty(
                "Relationship",
                &[("Id", id.as_str()), ("Type", *rel_type), ("Target", target.as_str())],
            )?;
        }
        xml.end("Relationships")?;
        Ok(xml.into_bytes())
    }
}
