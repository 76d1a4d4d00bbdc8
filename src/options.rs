use serde::{Deserialize, Serialize};

/// Which clutter to drop and whether to rename repaired entries.
///
/// All four switches are independent. The defaults drop `__MACOSX/`
/// sidecars and `.DS_Store` files, keep other dotfiles, and fix encodings.
///
/// # Example
///
/// ```
/// use zipmend::ProcessingOptions;
///
/// let options = ProcessingOptions::default().remove_hidden_files(true);
/// assert!(options.remove_metadata_artifacts);
/// assert!(options.remove_hidden_files);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessingOptions {
    /// Drop entries under a `__MACOSX` folder.
    pub remove_metadata_artifacts: bool,
    /// Drop `.DS_Store` files.
    pub remove_settings_files: bool,
    /// Drop entries with any dot-prefixed path segment.
    pub remove_hidden_files: bool,
    /// Rename entries whose names were repaired.
    ///
    /// When off, a legacy name is still written as UTF-8 text: the output
    /// name is the UTF-8 encoding of its byte-per-character reading, not the
    /// original stored bytes, so it does not read correctly under the
    /// original codepage either.
    pub fix_encoding: bool,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            remove_metadata_artifacts: true,
            remove_settings_files: true,
            remove_hidden_files: false,
            fix_encoding: true,
        }
    }
}

impl ProcessingOptions {
    pub fn remove_metadata_artifacts(mut self, yes: bool) -> Self {
        self.remove_metadata_artifacts = yes;
        self
    }

    pub fn remove_settings_files(mut self, yes: bool) -> Self {
        self.remove_settings_files = yes;
        self
    }

    pub fn remove_hidden_files(mut self, yes: bool) -> Self {
        self.remove_hidden_files = yes;
        self
    }

    pub fn fix_encoding(mut self, yes: bool) -> Self {
        self.fix_encoding = yes;
        self
    }
}
