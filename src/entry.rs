//! Format-neutral view of an archive entry.

/// Kind of an archive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// An entry name as stored in the container, plus the text a naive reader sees.
///
/// `view` is the UTF-8 reading of `raw` when the bytes are valid UTF-8.
/// Otherwise every byte becomes the code point of the same value, which is how
/// legacy-encoded names get smuggled through a text type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryName {
    view: String,
    raw: Vec<u8>,
}

impl EntryName {
    /// Build a name from the bytes stored in the container.
    pub fn from_raw(raw: impl Into<Vec<u8>>) -> Self {
        let raw = raw.into();
        let view = match std::str::from_utf8(&raw) {
            Ok(s) => s.to_owned(),
            Err(_) => raw.iter().map(|&b| char::from(b)).collect(),
        };
        Self { view, raw }
    }

    /// Build a name from text that is already decoded (host files, tests).
    pub fn from_text(text: impl Into<String>) -> Self {
        let view = text.into();
        let raw = view.as_bytes().to_vec();
        Self { view, raw }
    }

    /// The naive text reading of the name.
    pub fn as_str(&self) -> &str {
        &self.view
    }

    /// The bytes exactly as stored.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Whether the stored bytes were valid UTF-8.
    pub fn is_utf8(&self) -> bool {
        self.view.as_bytes() == self.raw.as_slice()
    }
}

/// Metadata for one entry of a source archive.
///
/// Entries are never mutated: a repaired name produces a new output path
/// bound to the same payload, which is read lazily through the adapter by
/// `index`.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Position in the container's encounter order.
    pub index: usize,
    pub name: EntryName,
    pub kind: EntryKind,
    /// Declared uncompressed size.
    pub size: u64,
    /// Unix permission bits, when the container records them.
    pub mode: Option<u32>,
}

impl ArchiveEntry {
    /// Path as the naive reader sees it.
    pub fn path(&self) -> &str {
        self.name.as_str()
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}
