use std::{
    borrow::Cow,
    fmt, fs,
    fs::File,
    io::{self, Cursor, Read},
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{Archive, LocatorError, ResourceLoader, Result};

pub type ByteStream = Box<dyn Read + Send>;

/// Where the bytes of a signature file come from.
///
/// Only [`Locator::named_resource`] touches the filesystem on construction; the other variants
/// do no I/O until [`Locator::open_stream`] is called.
#[derive(Debug, Clone)]
pub enum Locator {
    LocalFile(PathBuf),
    ArchiveEntry {
        archive: Arc<Archive>,
        entry: String,
    },
    NamedResource {
        name: String,
        url: String,
        path: PathBuf,
    },
}
impl Locator {
    pub fn local_file(path: impl Into<PathBuf>) -> Self {
        Locator::LocalFile(path.into())
    }

    pub fn archive_entry(archive: &Arc<Archive>, entry: impl Into<String>) -> Self {
        Locator::ArchiveEntry {
            archive: Arc::clone(archive),
            entry: entry.into(),
        }
    }

    pub fn named_resource(loader: &ResourceLoader, name: &str) -> Result<Self> {
        let path = loader
            .resolve(name)
            .ok_or_else(|| LocatorError::ResourceNotFound(name.to_owned()))?;
        let url = format!("file://{}", fs::canonicalize(&path)?.display());

        log::debug!("Resolved resource {} to {}", name, url);

        Ok(Locator::NamedResource {
            name: name.to_owned(),
            url,
            path,
        })
    }

    /// Opens a fresh stream positioned at the first byte of the source.
    pub fn open_stream(&self) -> io::Result<ByteStream> {
        match self {
            Locator::LocalFile(path) | Locator::NamedResource { path, .. } => {
                Ok(Box::new(File::open(path)?))
            }
            Locator::ArchiveEntry { archive, entry } => {
                Ok(Box::new(Cursor::new(archive.read_entry(entry)?)))
            }
        }
    }

    /// The name whose suffix identifies the file format.
    pub fn file_name(&self) -> Cow<'_, str> {
        match self {
            Locator::LocalFile(path) => path.to_string_lossy(),
            Locator::ArchiveEntry { entry, .. } => Cow::Borrowed(entry),
            Locator::NamedResource { name, .. } => Cow::Borrowed(name),
        }
    }

    /// For diagnostics only.
    pub fn display_name(&self) -> String {
        self.to_string()
    }
}
impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::LocalFile(path) => write!(f, "{}", path.display()),
            Locator::ArchiveEntry { archive, entry } => {
                write!(f, "archive:{}!/{}", archive_name(archive.path()), entry)
            }
            Locator::NamedResource { url, .. } => f.write_str(url),
        }
    }
}

fn archive_name(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy())
}
