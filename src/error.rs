use std::fmt;

/// Errors that can occur while diagnosing or rewriting an archive.
///
/// A filename that cannot be repaired is *not* an error: it passes through
/// unchanged. Every variant here is terminal for the current operation and
/// no partial report or archive is returned alongside it.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in minor versions without breaking existing code. Always include a
/// catch-all `_ =>` arm when matching.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The input bytes are not a readable ZIP container.
    Zip(zip::result::ZipError),

    /// An entry's payload could not be extracted.
    EntryRead {
        entry: String,
        source: std::io::Error,
    },

    /// Encoding the output container failed.
    ArchiveWrite(zip::result::ZipError),

    /// Two kept entries resolve to the same output path.
    DuplicateEntry { entry: String },

    /// A host file path cannot be stored in an archive.
    InvalidPath { entry: String, reason: String },

    /// A candidate encoding label is not recognised.
    UnknownEncoding { label: String },

    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zip(e) => write!(f, "malformed zip archive: {}", e),
            Self::EntryRead { entry, source } => {
                write!(f, "failed to read entry '{}': {}", entry, source)
            }
            Self::ArchiveWrite(e) => write!(f, "failed to write zip archive: {}", e),
            Self::DuplicateEntry { entry } => {
                write!(
                    f,
                    "entry '{}' appears more than once in the output archive",
                    entry
                )
            }
            Self::InvalidPath { entry, reason } => {
                write!(f, "invalid path '{}': {}", entry, reason)
            }
            Self::UnknownEncoding { label } => {
                write!(f, "unknown encoding label '{}'", label)
            }
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Zip(e) | Self::ArchiveWrite(e) => Some(e),
            Self::EntryRead { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

// Reading is the common path; writer errors are wrapped explicitly.
impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Self::Zip(e)
    }
}
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
