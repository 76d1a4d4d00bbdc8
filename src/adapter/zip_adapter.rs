//! ZIP archive reader.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use crate::entry::{ArchiveEntry, EntryKind, EntryName};
use crate::error::Error;

/// Adapter for reading ZIP archives.
///
/// Entry metadata comes from the central directory without decompressing
/// anything; payloads are read on demand with [`Self::read`].
///
/// # Example
///
/// ```no_run
/// use zipmend::ZipAdapter;
///
/// let mut adapter = ZipAdapter::open("archive.zip")?;
/// for entry in adapter.entries()? {
///     println!("{}", entry.path());
/// }
/// # Ok::<(), zipmend::Error>(())
/// ```
pub struct ZipAdapter<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
}

impl ZipAdapter<BufReader<File>> {
    /// Open a ZIP file from a path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl ZipAdapter<Cursor<Vec<u8>>> {
    /// Read a ZIP archive held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, Error> {
        Self::new(Cursor::new(data))
    }
}

impl<R: Read + Seek> ZipAdapter<R> {
    /// Parse the central directory. Fails with [`Error::Zip`] on anything
    /// that is not a readable ZIP container.
    pub fn new(reader: R) -> Result<Self, Error> {
        let archive = zip::ZipArchive::new(reader)?;
        Ok(Self { archive })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Metadata for the entry at `index`.
    pub fn entry(&mut self, index: usize) -> Result<ArchiveEntry, Error> {
        // by_index_raw reads metadata WITHOUT decompressing
        let file = self.archive.by_index_raw(index)?;
        let kind = if file.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };

        Ok(ArchiveEntry {
            index,
            name: EntryName::from_raw(file.name_raw()),
            kind,
            size: file.size(),
            mode: file.unix_mode(),
        })
    }

    /// Metadata for every entry, in central-directory order.
    pub fn entries(&mut self) -> Result<Vec<ArchiveEntry>, Error> {
        (0..self.len()).map(|i| self.entry(i)).collect()
    }

    /// Decompress an entry's payload.
    ///
    /// Any failure (unsupported method, encryption, CRC mismatch) is reported
    /// as [`Error::EntryRead`] for that entry.
    pub fn read(&mut self, entry: &ArchiveEntry) -> Result<Vec<u8>, Error> {
        let read_error = |source: std::io::Error| Error::EntryRead {
            entry: entry.path().to_string(),
            source,
        };

        let mut file = self
            .archive
            .by_index(entry.index)
            .map_err(|e| read_error(e.into()))?;

        // Declared sizes are untrusted; only use them as a capacity hint.
        let hint = usize::try_from(entry.size.min(1 << 20)).unwrap_or(0);
        let mut data = Vec::with_capacity(hint);
        file.read_to_end(&mut data).map_err(read_error)?;
        Ok(data)
    }
}
