//! Open Packaging Convention plumbing shared by the DOCX and PPTX renderers.
//!
//! Office Open XML files are ZIP archives of XML parts, tied together by a
//! `[Content_Types].xml` manifest and `_rels/*.rels` relationship parts.

pub mod package;
pub mod props;
pub mod reader;
pub mod rels;
pub mod xml;

pub use package::Package;
pub use reader::PackageReader;
pub use rels::Relationships;
pub use xml::XmlWriter;
