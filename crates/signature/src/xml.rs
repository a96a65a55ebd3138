use std::{io::BufRead, str};

use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

use crate::{MalformedDocument, SchemaViolation};

/// A start tag with its attributes decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tag {
    name: String,
    attributes: Vec<(String, String)>,
}
impl Tag {
    #[cfg(test)]
    pub(crate) fn new(name: &str, attributes: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_owned(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, MalformedDocument> {
        let name = str::from_utf8(start.name().as_ref())?.to_owned();
        let attributes = start
            .attributes()
            .map(|attribute| {
                let attribute = attribute.map_err(quick_xml::Error::InvalidAttr)?;
                Ok((
                    str::from_utf8(attribute.key.as_ref())?.to_owned(),
                    attribute.unescape_value()?.into_owned(),
                ))
            })
            .collect::<Result<Vec<_>, MalformedDocument>>()?;

        Ok(Self { name, attributes })
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn required(&self, name: &'static str) -> Result<&str, SchemaViolation> {
        self.attribute(name)
            .ok_or_else(|| SchemaViolation::MissingAttribute {
                tag: self.name.clone(),
                attribute: name,
            })
    }

    pub(crate) fn attributes(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum XmlEvent {
    Start(Tag),
    End(String),
    Eof,
}

/// Pull cursor over tag boundaries. Text, comments, declarations and the like are skipped once
/// they are known to be valid UTF-8.
pub(crate) struct XmlCursor<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    open_tags: Vec<String>,
}
impl<R: BufRead> XmlCursor<R> {
    pub(crate) fn new(r: R) -> Self {
        let mut reader = Reader::from_reader(r);
        reader.config_mut().expand_empty_elements = true;

        Self {
            reader,
            buf: Vec::new(),
            open_tags: Vec::new(),
        }
    }

    /// Ending the input while any tag is still open is an error.
    pub(crate) fn next_event(&mut self) -> Result<XmlEvent, MalformedDocument> {
        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(start) => {
                    let tag = Tag::from_start(&start)?;
                    self.open_tags.push(tag.name().to_owned());
                    return Ok(XmlEvent::Start(tag));
                }
                Event::End(end) => {
                    let name = str::from_utf8(end.name().as_ref())?.to_owned();
                    self.open_tags.pop();
                    return Ok(XmlEvent::End(name));
                }
                Event::Eof => {
                    return match self.open_tags.pop() {
                        Some(open) => Err(MalformedDocument::UnexpectedEof(open)),
                        None => Ok(XmlEvent::Eof),
                    }
                }
                Event::Text(text) | Event::Comment(text) => {
                    str::from_utf8(&text)?;
                }
                Event::CData(data) => {
                    str::from_utf8(&data)?;
                }
                _ => continue,
            }
        }
    }
}

#[cfg(test)]
mod xml_cursor_tests {
    use super::*;

    fn events(xml: &str) -> Vec<XmlEvent> {
        let mut cursor = XmlCursor::new(xml.as_bytes());
        let mut events = Vec::new();
        loop {
            match cursor.next_event().unwrap() {
                XmlEvent::Eof => return events,
                e => events.push(e),
            }
        }
    }

    #[test]
    fn it_should_only_report_tag_boundaries() {
        assert_eq!(
            vec![
                XmlEvent::Start(Tag::new("api", &[])),
                XmlEvent::Start(Tag::new("package", &[("name", "a")])),
                XmlEvent::End("package".to_owned()),
                XmlEvent::End("api".to_owned()),
            ],
            events("<?xml version=\"1.0\"?>\n<!-- c -->\n<api>text<package name=\"a\"></package></api>")
        );
    }

    #[test]
    fn it_should_expand_empty_elements() {
        assert_eq!(
            vec![
                XmlEvent::Start(Tag::new("field", &[("name", "X")])),
                XmlEvent::End("field".to_owned()),
            ],
            events("<field name=\"X\"/>")
        );
    }

    #[test]
    fn it_should_unescape_attribute_values() {
        assert_eq!(
            vec![
                XmlEvent::Start(Tag::new(
                    "class",
                    &[("extends", "java.util.List<java.lang.String>")]
                )),
                XmlEvent::End("class".to_owned()),
            ],
            events("<class extends=\"java.util.List&lt;java.lang.String&gt;\"/>")
        );
    }

    #[test]
    fn it_should_fail_on_mismatched_end_tags() {
        let mut cursor = XmlCursor::new("<api></class>".as_bytes());
        cursor.next_event().unwrap();

        assert!(cursor.next_event().is_err());
    }

    #[test]
    fn it_should_fail_when_the_input_ends_inside_a_tag() {
        let mut cursor = XmlCursor::new("<api><class name=\"A\">".as_bytes());
        cursor.next_event().unwrap();
        cursor.next_event().unwrap();

        assert!(matches!(
            cursor.next_event(),
            Err(MalformedDocument::UnexpectedEof(open)) if open == "class"
        ));
    }

    #[test]
    fn it_should_reject_invalid_utf8_in_tag_names() {
        let mut cursor = XmlCursor::new(&b"<api><fi\xffeld name=\"X\"/></api>"[..]);
        cursor.next_event().unwrap();

        assert!(matches!(
            cursor.next_event(),
            Err(MalformedDocument::InvalidUtf8(_))
        ));
    }

    #[test]
    fn it_should_reject_invalid_utf8_in_text() {
        let mut cursor = XmlCursor::new(&b"<api>\xfe\xfe</api>"[..]);
        cursor.next_event().unwrap();

        assert!(matches!(
            cursor.next_event(),
            Err(MalformedDocument::InvalidUtf8(_))
        ));
    }

    #[test]
    fn it_should_look_up_attributes_by_name() {
        let tag = Tag::new("method", &[("name", "run"), ("return", "void")]);

        assert_eq!(Some("void"), tag.attribute("return"));
        assert_eq!(None, tag.attribute("static"));
        assert_eq!(
            Err(SchemaViolation::MissingAttribute {
                tag: "method".to_owned(),
                attribute: "type",
            }),
            tag.required("type")
        );
    }
}
