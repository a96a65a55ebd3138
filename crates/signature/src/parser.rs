use std::{
    io::{BufRead, BufReader},
    iter::FusedIterator,
};

use flate2::read::MultiGzDecoder;
use sigcheck_locator::{ByteStream, Locator};

use crate::{
    class_description::{ClassBuilder, MemberBuilder},
    decode_modifiers,
    literal::{canonicalize_type, canonicalize_value},
    xml::{Tag, XmlCursor, XmlEvent},
    ClassDescription, ClassKind, Field, MalformedDocument, Result, SchemaViolation,
    SignatureError,
};

const TAG_API: &str = "api";
const TAG_PACKAGE: &str = "package";
const TAG_CLASS: &str = "class";
const TAG_INTERFACE: &str = "interface";
const TAG_IMPLEMENTS: &str = "implements";
const TAG_CONSTRUCTOR: &str = "constructor";
const TAG_METHOD: &str = "method";
const TAG_PARAMETER: &str = "parameter";
const TAG_EXCEPTION: &str = "exception";
const TAG_FIELD: &str = "field";

const ATTR_NAME: &str = "name";
const ATTR_EXTENDS: &str = "extends";
const ATTR_RETURN: &str = "return";
const ATTR_TYPE: &str = "type";
const ATTR_VALUE: &str = "value";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
}

/// Reads the XML signature format, optionally gzip-compressed.
#[derive(Debug, Clone, Copy)]
pub struct XmlSignatureParser {
    compression: Compression,
}
impl XmlSignatureParser {
    pub fn new(compression: Compression) -> Self {
        Self { compression }
    }

    /// Opens the locator's stream. Nothing is decoded until the first class is requested.
    pub fn parse(&self, locator: &Locator) -> Result<ClassDescriptions<BufReader<ByteStream>>> {
        let location = locator.display_name();
        log::debug!("Opening {} ({:?})", location, self.compression);

        let stream = locator
            .open_stream()
            .map_err(|e| SignatureError::MalformedDocument {
                location: location.clone(),
                cause: e.into(),
            })?;
        let stream: ByteStream = match self.compression {
            Compression::None => stream,
            Compression::Gzip => Box::new(MultiGzDecoder::new(stream)),
        };

        Ok(ClassDescriptions::from_reader(
            BufReader::new(stream),
            location,
        ))
    }
}

/// Lazy, forward-only sequence of the classes in one signature document.
///
/// The first error ends the sequence; classes yielded before it stay valid.
pub struct ClassDescriptions<R> {
    cursor: XmlCursor<R>,
    location: String,
    state: ParseState,
    started: bool,
    finished: bool,
}
impl<R: BufRead> ClassDescriptions<R> {
    /// `location` only appears in error messages.
    pub fn from_reader(r: R, location: impl Into<String>) -> Self {
        Self {
            cursor: XmlCursor::new(r),
            location: location.into(),
            state: ParseState::default(),
            started: false,
            finished: false,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    fn read_root(&mut self) -> Result<()> {
        match self.cursor.next_event() {
            Ok(XmlEvent::Start(tag)) if tag.name() == TAG_API => Ok(()),
            Ok(XmlEvent::Start(tag)) => Err(self.malformed(MalformedDocument::UnexpectedRoot(
                tag.name().to_owned(),
            ))),
            Ok(XmlEvent::End(_)) | Ok(XmlEvent::Eof) => {
                Err(self.malformed(MalformedDocument::MissingRoot))
            }
            Err(e) => Err(self.malformed(e)),
        }
    }

    fn pull_next(&mut self) -> Result<Option<ClassDescription>> {
        loop {
            let event = match self.cursor.next_event() {
                Ok(event) => event,
                Err(e) => return Err(self.malformed(e)),
            };

            match event {
                XmlEvent::Eof => return Ok(None),
                XmlEvent::End(name) => {
                    if let Some(class) = self.state.end_tag(&name) {
                        log::trace!("{}: parsed {}", self.location, class);
                        return Ok(Some(class));
                    }
                }
                XmlEvent::Start(tag) => {
                    if let Err(violation) = self.state.start_tag(&tag) {
                        return Err(SignatureError::SchemaViolation {
                            location: self.location.clone(),
                            violation,
                        });
                    }
                }
            }
        }
    }

    fn malformed(&self, cause: MalformedDocument) -> SignatureError {
        SignatureError::MalformedDocument {
            location: self.location.clone(),
            cause,
        }
    }
}
impl<R: BufRead> Iterator for ClassDescriptions<R> {
    type Item = Result<ClassDescription>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let next = if self.started {
            self.pull_next()
        } else {
            self.started = true;
            match self.read_root() {
                Ok(()) => self.pull_next(),
                Err(e) => Err(e),
            }
        };

        match next {
            Ok(Some(class)) => Some(Ok(class)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
impl<R: BufRead> FusedIterator for ClassDescriptions<R> {}

/// Everything the scan remembers between tags.
#[derive(Debug, Default)]
struct ParseState {
    current_package: String,
    current_class: Option<ClassBuilder>,
    current_member: Option<MemberBuilder>,
}
impl ParseState {
    fn start_tag(&mut self, tag: &Tag) -> Result<(), SchemaViolation> {
        match tag.name() {
            TAG_PACKAGE => self.current_package = tag.required(ATTR_NAME)?.to_owned(),
            TAG_CLASS => self.open_class(tag, ClassKind::Class)?,
            TAG_INTERFACE => self.open_class(tag, ClassKind::Interface)?,
            TAG_IMPLEMENTS => {
                let class = current_class(&mut self.current_class, tag)?;
                class.implements(tag.required(ATTR_NAME)?);
            }
            TAG_CONSTRUCTOR => {
                let class = current_class(&mut self.current_class, tag)?;
                let constructor =
                    MemberBuilder::constructor(class.simple_name(), decode_modifiers(tag.attributes())?);
                if let Some(previous) = self.current_member.replace(constructor) {
                    class.add_member(previous);
                }
            }
            TAG_METHOD => {
                let class = current_class(&mut self.current_class, tag)?;
                let method = MemberBuilder::method(
                    tag.required(ATTR_NAME)?,
                    canonicalize_type(tag.required(ATTR_RETURN)?),
                    decode_modifiers(tag.attributes())?,
                );
                if let Some(previous) = self.current_member.replace(method) {
                    class.add_member(previous);
                }
            }
            TAG_PARAMETER => {
                let member = current_member(&mut self.current_member, tag)?;
                member.add_parameter(canonicalize_type(tag.required(ATTR_TYPE)?));
            }
            TAG_EXCEPTION => {
                // Exception types are kept verbatim, unlike every other type.
                let member = current_member(&mut self.current_member, tag)?;
                member.add_exception(tag.required(ATTR_TYPE)?.to_owned());
            }
            TAG_FIELD => {
                let class = current_class(&mut self.current_class, tag)?;
                if let Some(previous) = self.current_member.take() {
                    class.add_member(previous);
                }
                class.add_field(decode_field(tag)?);
            }
            name => log::trace!("Ignoring <{}>", name),
        }

        Ok(())
    }

    fn end_tag(&mut self, name: &str) -> Option<ClassDescription> {
        match name {
            TAG_CLASS | TAG_INTERFACE => {
                let mut class = self.current_class.take()?;
                if let Some(member) = self.current_member.take() {
                    class.add_member(member);
                }
                Some(class.build())
            }
            TAG_PACKAGE => {
                self.current_package.clear();
                None
            }
            _ => None,
        }
    }

    fn open_class(&mut self, tag: &Tag, kind: ClassKind) -> Result<(), SchemaViolation> {
        if self.current_class.is_some() {
            return Err(SchemaViolation::UnexpectedTag {
                tag: tag.name().to_owned(),
                context: "inside another class",
            });
        }

        let mut class = ClassBuilder::new(
            &self.current_package,
            tag.required(ATTR_NAME)?,
            kind,
            decode_modifiers(tag.attributes())?,
        );
        if let Some(extends) = tag.attribute(ATTR_EXTENDS) {
            class.extends(extends);
        }

        self.current_class = Some(class);
        self.current_member = None;
        Ok(())
    }
}

fn current_class<'a>(
    class: &'a mut Option<ClassBuilder>,
    tag: &Tag,
) -> Result<&'a mut ClassBuilder, SchemaViolation> {
    class.as_mut().ok_or_else(|| SchemaViolation::UnexpectedTag {
        tag: tag.name().to_owned(),
        context: "outside of a class",
    })
}

fn current_member<'a>(
    member: &'a mut Option<MemberBuilder>,
    tag: &Tag,
) -> Result<&'a mut MemberBuilder, SchemaViolation> {
    member.as_mut().ok_or_else(|| SchemaViolation::UnexpectedTag {
        tag: tag.name().to_owned(),
        context: "outside of a constructor or method",
    })
}

fn decode_field(tag: &Tag) -> Result<Field, SchemaViolation> {
    let field_type = tag.required(ATTR_TYPE)?;
    let value = match tag.attribute(ATTR_VALUE) {
        Some(literal) => canonicalize_value(field_type, literal)?,
        None => None,
    };

    Ok(Field {
        name: tag.required(ATTR_NAME)?.to_owned(),
        field_type: canonicalize_type(field_type),
        modifiers: decode_modifiers(tag.attributes())?,
        value,
    })
}
