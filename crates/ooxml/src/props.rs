//! Document property parts (`docProps/core.xml`, `docProps/app.xml`).

use crate::package::{content_types, Package};
use crate::xml::XmlWriter;
use docforge_core::Result;

/// Name recorded as the producing application.
pub const APPLICATION: &str = "docforge";

/// Add core and extended property parts for a document.
pub fn add_properties(package: &mut Package, title: &str, subject: &str) -> Result<()> {
    package.add_part(
        "docProps/core.xml",
        content_types::CORE_PROPERTIES,
        core_properties(title, subject)?,
    );
    package.add_part(
        "docProps/app.xml",
        content_types::EXTENDED_PROPERTIES,
        app_properties()?,
    );
    Ok(())
}

fn core_properties(title: &str, subject: &str) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    xml.text_element("dc:title", &[], title)?;
    xml.text_element("dc:subject", &[], subject)?;
    xml.text_element("dc:creator", &[], APPLICATION)?;
    xml.end("cp:coreProperties")?;
    Ok(xml.into_bytes())
}

fn app_properties() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "Properties",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
        )],
    )?;
    xml.text_element("Application", &[], APPLICATION)?;
    xml.end("Properties")?;
    Ok(xml.into_bytes())
}
