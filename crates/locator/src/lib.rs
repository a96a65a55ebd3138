// Byte sources for signature files: plain files, archive entries and loader-resolved resources.

mod archive;
mod error;
mod loader;
mod locator;

pub use archive::Archive;
pub use error::LocatorError;
pub use loader::{ResourceLoader, RESOURCE_PATH_VAR};
pub use locator::{ByteStream, Locator};

pub type Result<T, E = LocatorError> = std::result::Result<T, E>;
