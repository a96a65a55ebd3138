use std::io::BufReader;

use sigcheck_locator::{ByteStream, Locator};

use crate::{ClassDescriptions, Compression, ConfigurationError, Result, XmlSignatureParser};

/// Signature file formats, told apart by file name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureFormat {
    /// `*.api`
    Xml,
    /// `*.api.gz`
    GzipXml,
    /// `*.txt`, which is no longer read.
    LegacyText,
    Unrecognized,
}
impl SignatureFormat {
    pub fn from_file_name(name: &str) -> Self {
        if name.ends_with(".api.gz") {
            SignatureFormat::GzipXml
        } else if name.ends_with(".api") {
            SignatureFormat::Xml
        } else if name.ends_with(".txt") {
            SignatureFormat::LegacyText
        } else {
            SignatureFormat::Unrecognized
        }
    }
}

/// Picks a parser for the locator's format and starts parsing.
///
/// Unsupported formats are rejected without opening the locator.
pub fn parse(locator: &Locator) -> Result<ClassDescriptions<BufReader<ByteStream>>> {
    let format = SignatureFormat::from_file_name(&locator.file_name());
    log::debug!("{} has format {:?}", locator, format);

    match format {
        SignatureFormat::Xml => XmlSignatureParser::new(Compression::None).parse(locator),
        SignatureFormat::GzipXml => XmlSignatureParser::new(Compression::Gzip).parse(locator),
        SignatureFormat::LegacyText => Err(ConfigurationError::UnsupportedFormat {
            location: locator.display_name(),
            format: "text",
        }
        .into()),
        SignatureFormat::Unrecognized => {
            Err(ConfigurationError::UnrecognizedFormat(locator.display_name()).into())
        }
    }
}
