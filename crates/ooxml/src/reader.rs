//! Reading text back out of a rendered package.

use docforge_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Read access to the parts of an OPC package.
pub struct PackageReader<R> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> PackageReader<R> {
    /// Open a package.
    pub fn new(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;
        Ok(Self { archive })
    }

    /// Part names in archive order.
    pub fn part_names(&mut self) -> Vec<String> {
        (0..self.archive.len())
            .filter_map(|i| self.archive.by_index(i).ok().map(|f| f.name().to_string()))
            .collect()
    }

    /// Whether the package contains `path`.
    pub fn has_part(&mut self, path: &str) -> bool {
        self.archive.by_name(path).is_ok()
    }

    /// Read a part as UTF-8 text.
    pub fn read_part(&mut self, path: &str) -> Result<String> {
        let mut file = self
            .archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;
        Ok(content)
    }

    /// Text of every paragraph in a part.
    pub fn paragraphs(&mut self, path: &str) -> Result<Vec<String>> {
        paragraph_texts(&self.read_part(path)?)
    }

    /// Slide part paths in presentation order, following the slide id list
    /// of `ppt/presentation.xml` through its relationships.
    pub fn slide_paths(&mut self) -> Result<Vec<String>> {
        let targets = relationship_targets(&self.read_part("ppt/_rels/presentation.xml.rels")?)?;
        let presentation = self.read_part("ppt/presentation.xml")?;

        let mut reader = Reader::from_str(&presentation);
        let mut paths = Vec::new();
        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"sldId" =>
                {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"r:id" {
                            let id = String::from_utf8_lossy(&attr.value).to_string();
                            let target = targets.get(&id).ok_or_else(|| {
                                Error::XmlError(format!("Slide relationship '{}' is missing", id))
                            })?;
                            paths.push(resolve_target("ppt", target));
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing presentation.xml: {}",
                        e
                    )));
                }
                _ => {}
            }
        }
        Ok(paths)
    }
}

/// Collect the text of each `p` element (`w:p` or `a:p`), joining runs and
/// turning `tab` elements inside runs into `\t`.
pub fn paragraph_texts(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    let mut in_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"p" => current = Some(String::new()),
                b"r" => in_run = true,
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"p" => paragraphs.push(String::new()),
                b"tab" if in_run => {
                    if let Some(text) = current.as_mut() {
                        text.push('\t');
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| Error::XmlError(format!("Bad text content: {}", e)))?;
                if let Some(current) = current.as_mut() {
                    current.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"p" => {
                    if let Some(text) = current.take() {
                        paragraphs.push(text);
                    }
                }
                b"r" => in_run = false,
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(format!("Error parsing part: {}", e))),
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Map relationship ids to targets.
fn relationship_targets(rels: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(rels);
    let mut targets = HashMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"Relationship" =>
            {
                let mut id = String::new();
                let mut target = String::new();
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => id = String::from_utf8_lossy(&attr.value).to_string(),
                        b"Target" => target = String::from_utf8_lossy(&attr.value).to_string(),
                        _ => {}
                    }
                }
                targets.insert(id, target);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(targets)
}

/// Resolve a relationship target relative to the source part's directory.
fn resolve_target(base_dir: &str, target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("{}/{}", base_dir, target),
    }
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}
