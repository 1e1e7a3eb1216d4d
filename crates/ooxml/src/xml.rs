//! Thin wrapper over `quick_xml::Writer` for building XML parts.

use docforge_core::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::borrow::Cow;

/// Builds one XML part in memory. Attribute values and text are escaped,
/// and characters XML 1.0 cannot represent are dropped.
pub struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    /// Start a part with the standalone UTF-8 declaration Office expects.
    pub fn new() -> Result<Self> {
        let mut writer = Self {
            inner: Writer::new(Vec::new()),
        };
        writer.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(writer)
    }

    /// Open an element.
    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.write(Event::Start(element(name, attrs)))
    }

    /// Close an element.
    pub fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// Write a self-closing element.
    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.write(Event::Empty(element(name, attrs)))
    }

    /// Write escaped character data.
    pub fn text(&mut self, text: &str) -> Result<()> {
        self.write(Event::Text(BytesText::new(&xml_chars(text))))
    }

    /// Write `<name attrs>text</name>`.
    pub fn text_element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    /// Finish and return the serialized part.
    pub fn into_bytes(self) -> Vec<u8> {
        self.inner.into_inner()
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.inner
            .write_event(event)
            .map_err(|e| Error::XmlError(format!("Failed to write XML: {}", e)))
    }
}

fn element<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for &(key, value) in attrs {
        start.push_attribute((key, xml_chars(value).as_ref()));
    }
    start
}

/// Whether `c` is a legal XML 1.0 character.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// `text` without characters XML 1.0 forbids, such as escape codes.
fn xml_chars(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| is_xml_char(c)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_text_and_attributes() {
        let mut writer = XmlWriter::new().unwrap();
        writer.start("root", &[("name", "a\"b")]).unwrap();
        writer.text_element("t", &[], "Fish & <Chips>").unwrap();
        writer.empty("br", &[("type", "page")]).unwrap();
        writer.end("root").unwrap();

        let xml = String::from_utf8(writer.into_bytes()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>"));
        assert!(xml.contains("<root name=\"a&quot;b\">"));
        assert!(xml.contains("<t>Fish &amp; &lt;Chips&gt;</t>"));
        assert!(xml.contains("<br type=\"page\"/>"));
        assert!(xml.ends_with("</root>"));
    }

    #[test]
    fn test_drops_forbidden_characters() {
        let mut writer = XmlWriter::new().unwrap();
        writer.start("root", &[("title", "a\u{0}b\u{1B}")]).unwrap();
        writer.text_element("t", &[], "Bad\u{0B}char \u{1B}[0m\ttab\u{FFFF}").unwrap();
        writer.end("root").unwrap();

        let xml = String::from_utf8(writer.into_bytes()).unwrap();
        assert!(xml.contains("<root title=\"ab\">"));
        assert!(xml.contains("<t>Badchar [0m\ttab</t>"));
        assert!(!xml.chars().any(|c| !is_xml_char(c)));
    }

    #[test]
    fn test_xml_chars_borrows_clean_text() {
        assert!(matches!(xml_chars("plain text\n"), Cow::Borrowed(_)));
        assert_eq!(xml_chars("a\u{7}b"), "ab");
    }
}
