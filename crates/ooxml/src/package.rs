//! Assembling parts into an OPC ZIP archive.

use crate::xml::XmlWriter;
use docforge_core::{Error, Result};
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const RELS_CONTENT_TYPE: &str = "application/vnd.openxmlformats-package.relationships+xml";

/// Content types of the parts written by the renderers.
pub mod content_types {
    pub const CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
    pub const EXTENDED_PROPERTIES: &str =
        "application/vnd.openxmlformats-officedocument.extended-properties+xml";
    pub const WORD_DOCUMENT: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    pub const WORD_STYLES: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
    pub const WORD_SETTINGS: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml";
    pub const PRESENTATION: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
    pub const SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
    pub const SLIDE_LAYOUT: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
    pub const SLIDE_MASTER: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
    pub const THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
}

/// A package under construction.
///
/// Parts are buffered and written on [`Package::finish`], with
/// `[Content_Types].xml` first. Entry timestamps are fixed, so the same
/// parts always produce the same bytes.
#[derive(Debug, Default)]
pub struct Package {
    parts: Vec<(String, Vec<u8>)>,
    overrides: Vec<(String, &'static str)>,
}

impl Package {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a part with an explicit content type.
    pub fn add_part(&mut self, path: &str, content_type: &'static str, bytes: Vec<u8>) {
        self.overrides.push((format!("/{}", path), content_type));
        self.parts.push((path.to_string(), bytes));
    }

    /// Add a relationships part; `.rels` has a default content type.
    pub fn add_rels(&mut self, path: &str, bytes: Vec<u8>) {
        self.parts.push((path.to_string(), bytes));
    }

    /// Number of parts added so far, excluding the content types manifest.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Write the archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let manifest = self.content_types_xml()?;
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        write_entry(&mut zip, "[Content_Types].xml", &manifest, options)?;
        for (path, bytes) in &self.parts {
            write_entry(&mut zip, path, bytes, options)?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))?;
        log::debug!("Wrote package with {} parts", self.parts.len() + 1);
        Ok(cursor.into_inner())
    }

    fn content_types_xml(&self) -> Result<Vec<u8>> {
        let mut xml = XmlWriter::new()?;
        xml.start("Types", &[("xmlns", CONTENT_TYPES_NS)])?;
        xml.empty(
            "Default",
            &[("Extension", "rels"), ("ContentType", RELS_CONTENT_TYPE)],
        )?;
        xml.empty(
            "Default",
            &[("Extension", "xml"), ("ContentType", "application/xml")],
        )?;
        for (part_name, content_type) in &self.overrides {
            xml.empty(
                "Override",
                &[("PartName", part_name.as_str()), ("ContentType", *content_type)],
            )?;
        }
        xml.end("Types")?;
        Ok(xml.into_bytes())
    }
}

fn write_entry(
    zip: &mut ZipWriter<Cursor<Vec<u8>>>,
    path: &str,
    bytes: &[u8],
    options: FileOptions,
) -> Result<()> {
    zip.start_file(path, options)
        .map_err(|e| Error::ZipError(format!("Failed to start '{}': {}", path, e)))?;
    zip.write_all(bytes)
        .map_err(|e| Error::ZipError(format!("Failed to write '{}': {}", path, e)))
}
