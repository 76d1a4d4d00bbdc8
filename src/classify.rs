//! Path classification for platform clutter.
//!
//! All functions here are pure and total: any string, including the empty
//! string and paths without `/`, yields an answer.

use serde::{Deserialize, Serialize};

/// Folder macOS uses for resource-fork sidecar entries inside archives.
pub const METADATA_FOLDER: &str = "__MACOSX";

/// Per-directory Finder settings file.
pub const SETTINGS_FILE: &str = ".DS_Store";

/// True if any path segment is exactly the metadata folder name.
///
/// Matching is case-sensitive and segment-exact: `__MACOSX_backup/` does
/// not match.
pub fn is_metadata_artifact(path: &str) -> bool {
    path.split('/').any(|seg| seg == METADATA_FOLDER)
}

/// True if the final segment is the settings file name, whether the path is
/// the bare name or ends in `/.DS_Store`.
pub fn is_settings_file(path: &str) -> bool {
    final_segment(path) == SETTINGS_FILE
}

/// True if any segment starts with `.`, other than the settings file itself.
pub fn is_hidden_file(path: &str) -> bool {
    path.split('/')
        .any(|seg| seg.starts_with('.') && seg != SETTINGS_FILE)
}

fn final_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Every tag a path carries, independently of precedence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathTags {
    pub metadata_artifact: bool,
    pub settings_file: bool,
    pub hidden_file: bool,
}

impl PathTags {
    pub fn of(path: &str) -> Self {
        Self {
            metadata_artifact: is_metadata_artifact(path),
            settings_file: is_settings_file(path),
            hidden_file: is_hidden_file(path),
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.metadata_artifact || self.settings_file || self.hidden_file)
    }

    /// The single class a report counts this path under.
    pub fn primary(&self) -> Option<PathClass> {
        if self.metadata_artifact {
            Some(PathClass::MetadataArtifact)
        } else if self.settings_file {
            Some(PathClass::SettingsFile)
        } else if self.hidden_file {
            Some(PathClass::HiddenFile)
        } else {
            None
        }
    }
}

/// Exclusive classification, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathClass {
    MetadataArtifact,
    SettingsFile,
    HiddenFile,
}

impl PathClass {
    /// Whether a diagnosis stops at this class without checking the encoding.
    pub fn short_circuits(self) -> bool {
        !matches!(self, PathClass::HiddenFile)
    }
}

/// Classify a path: metadata-artifact, then settings-file, then hidden-file.
pub fn classify(path: &str) -> Option<PathClass> {
    PathTags::of(path).primary()
}
