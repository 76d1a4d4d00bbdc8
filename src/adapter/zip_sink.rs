//! ZIP archive writer.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Error;

/// Deflate level used for every file, whatever the source compression was.
pub const DEFLATE_LEVEL: i32 = 6;

/// In-memory ZIP builder with a fixed compression policy.
///
/// Names are written as UTF-8 (the `zip` crate sets the language-encoding
/// flag for non-ASCII names). Nothing is returned until [`Self::finish`]
/// succeeds, so a failed rewrite never yields a partial archive.
pub struct ZipSink {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    files: usize,
}

impl Default for ZipSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ZipSink {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            files: 0,
        }
    }

    fn options(mode: Option<u32>) -> SimpleFileOptions {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(DEFLATE_LEVEL.into()));
        match mode {
            // Strip setuid/setgid/sticky; keep rwx bits only
            Some(mode) => options.unix_permissions(mode & 0o777),
            None => options,
        }
    }

    /// Append a file.
    pub fn add_file(&mut self, path: &str, data: &[u8], mode: Option<u32>) -> Result<(), Error> {
        self.writer
            .start_file(path.to_string(), Self::options(mode))
            .map_err(Error::ArchiveWrite)?;
        self.writer.write_all(data)?;
        self.files += 1;
        Ok(())
    }

    /// Append a directory entry.
    pub fn add_directory(&mut self, path: &str, mode: Option<u32>) -> Result<(), Error> {
        self.writer
            .add_directory(path.to_string(), Self::options(mode))
            .map_err(Error::ArchiveWrite)?;
        Ok(())
    }

    /// Number of files appended so far.
    pub fn files(&self) -> usize {
        self.files
    }

    /// Write the central directory and return the archive bytes.
    pub fn finish(self) -> Result<Vec<u8>, Error> {
        let cursor = self.writer.finish().map_err(Error::ArchiveWrite)?;
        Ok(cursor.into_inner())
    }
}
