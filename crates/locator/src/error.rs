use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocatorError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("Invalid archive {0}: {1}")]
    Zip(String, #[source] zip::result::ZipError),
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),
}
