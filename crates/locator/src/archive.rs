use std::{
    fmt,
    fs::File,
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use zip::{result::ZipError, ZipArchive};

use crate::{Locator, LocatorError, Result};

const SIGNATURE_SUFFIXES: [&str; 2] = [".api", ".api.gz"];

/// A zip archive shared by any number of [`Locator::ArchiveEntry`] locators.
pub struct Archive {
    path: PathBuf,
    zip: Mutex<ZipArchive<BufReader<File>>>,
}
impl Archive {
    pub fn open(path: impl AsRef<Path>) -> Result<Arc<Self>> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let zip = ZipArchive::new(BufReader::new(file))
            .map_err(|e| LocatorError::Zip(path.display().to_string(), e))?;

        log::debug!("Opened archive {} with {} entries", path.display(), zip.len());

        Ok(Arc::new(Self {
            path,
            zip: Mutex::new(zip),
        }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entry names in the order they are stored in the archive.
    pub fn entry_names(&self) -> Result<Vec<String>> {
        let mut zip = self.lock()?;
        (0..zip.len())
            .map(|i| {
                zip.by_index(i)
                    .map(|entry| entry.name().to_owned())
                    .map_err(|e| LocatorError::Zip(self.path.display().to_string(), e))
            })
            .collect()
    }

    /// One locator per entry that looks like a signature file.
    pub fn locators(self: &Arc<Self>) -> Result<Vec<Locator>> {
        Ok(self
            .entry_names()?
            .into_iter()
            .filter(|name| SIGNATURE_SUFFIXES.iter().any(|s| name.ends_with(s)))
            .map(|name| Locator::archive_entry(self, name))
            .collect())
    }

    pub(crate) fn read_entry(&self, name: &str) -> io::Result<Vec<u8>> {
        let mut zip = self.lock()?;
        let mut entry = zip.by_name(name).map_err(|e| zip_to_io(e, name))?;

        // The recorded size is not trusted for preallocation.
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, ZipArchive<BufReader<File>>>> {
        self.zip
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "archive lock poisoned"))
    }
}
impl fmt::Debug for Archive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Archive").field("path", &self.path).finish()
    }
}

fn zip_to_io(e: ZipError, name: &str) -> io::Error {
    match e {
        ZipError::Io(e) => e,
        ZipError::FileNotFound => io::Error::new(
            io::ErrorKind::NotFound,
            format!("No archive entry named {}", name),
        ),
        e => io::Error::new(io::ErrorKind::InvalidData, e),
    }
}
