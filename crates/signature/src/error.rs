use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("Malformed signature file {location}: {cause}")]
    MalformedDocument {
        location: String,
        #[source]
        cause: MalformedDocument,
    },
    #[error("Schema violation in {location}: {violation}")]
    SchemaViolation {
        location: String,
        #[source]
        violation: SchemaViolation,
    },
}
impl SignatureError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SignatureError::Configuration(_) => ErrorKind::Configuration,
            SignatureError::MalformedDocument { .. } => ErrorKind::MalformedDocument,
            SignatureError::SchemaViolation { .. } => ErrorKind::SchemaViolation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    MalformedDocument,
    SchemaViolation,
}

/// Raised before any byte of the document is read.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("{location}: the {format} signature format is not supported")]
    UnsupportedFormat {
        location: String,
        format: &'static str,
    },
    #[error("{0}: unrecognized signature format")]
    UnrecognizedFormat(String),
}

#[derive(Debug, Error)]
pub enum MalformedDocument {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    #[error("Expected <api> as the root tag, found <{0}>")]
    UnexpectedRoot(String),
    #[error("No root tag")]
    MissingRoot,
    #[error("Document ends inside <{0}>")]
    UnexpectedEof(String),
    #[error(transparent)]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("Private members cannot be described by a signature file")]
    PrivateVisibility,
    #[error("Unknown modifier value {attribute}=\"{value}\"")]
    UnknownModifierValue { attribute: String, value: String },
    #[error("Invalid char literal: {0}")]
    InvalidCharLiteral(String),
    #[error("Malformed escape sequence: {0}")]
    MalformedEscape(String),
    #[error("Unexpected <{tag}> {context}")]
    UnexpectedTag { tag: String, context: &'static str },
    #[error("<{tag}> is missing the {attribute} attribute")]
    MissingAttribute { tag: String, attribute: &'static str },
}
