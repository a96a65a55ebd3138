// Streaming reader for XML API signature files (`*.api`, `*.api.gz`).

mod class_description;
mod error;
mod format;
pub mod literal;
mod modifiers;
mod parser;
mod xml;

pub use class_description::{ClassDescription, ClassKind, Constructor, Field, Method};
pub use error::{ConfigurationError, ErrorKind, MalformedDocument, SchemaViolation, SignatureError};
pub use format::{parse, SignatureFormat};
pub use modifiers::{decode_modifiers, Modifiers};
pub use parser::{ClassDescriptions, Compression, XmlSignatureParser};
pub use sigcheck_locator::{self as locator, Locator};

pub type Result<T, E = SignatureError> = std::result::Result<T, E>;
